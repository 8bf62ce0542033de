//! Catalog management service

use crate::{
    error::AppResult,
    models::{catalog, Book},
};

use super::Ledger;

#[derive(Clone)]
pub struct CatalogService {
    ledger: Ledger,
}

impl CatalogService {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// Full catalog in stored order
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        let _guard = self.ledger.lock().await;
        self.ledger.store().load_books().await
    }

    /// Register a new book. Fails with `Conflict` if the ISBN is taken.
    pub async fn add_book(&self, book: Book) -> AppResult<Book> {
        let _guard = self.ledger.lock().await;
        let store = self.ledger.store();

        let mut books = store.load_books().await?;
        if let Err(e) = catalog::add_book(&mut books, book.clone()) {
            tracing::debug!("Rejected book {}: {}", book.isbn, e);
            return Err(e);
        }
        store.save_books(&books).await?;

        tracing::info!("Added book {} ({})", book.isbn, book.title);
        Ok(book)
    }

    /// Remove a book by ISBN. Removing an unknown ISBN is not an error.
    pub async fn remove_book(&self, isbn: &str) -> AppResult<usize> {
        let _guard = self.ledger.lock().await;
        let store = self.ledger.store();

        let mut books = store.load_books().await?;
        let removed = catalog::remove_book(&mut books, isbn);
        store.save_books(&books).await?;

        if removed > 0 {
            tracing::info!("Removed book {}", isbn);
        }
        Ok(removed)
    }

    /// Search title, author and ISBN, ignoring case
    pub async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        let _guard = self.ledger.lock().await;
        let books = self.ledger.store().load_books().await?;
        Ok(catalog::search_books(&books, term))
    }
}
