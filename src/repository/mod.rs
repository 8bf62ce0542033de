//! Persistence gateway for the catalog and the roster.
//!
//! Collections are always read and written whole. A missing collection loads
//! as empty.

pub mod json;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    config::{StorageBackend, StorageConfig},
    error::AppResult,
    models::{Book, Snapshot, User},
};

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Whole-collection storage for books and users
#[async_trait]
pub trait Store: Send + Sync {
    async fn load_books(&self) -> AppResult<Vec<Book>>;

    async fn load_users(&self) -> AppResult<Vec<User>>;

    /// Replace the stored catalog
    async fn save_books(&self, books: &[Book]) -> AppResult<()>;

    /// Replace the stored roster
    async fn save_users(&self, users: &[User]) -> AppResult<()>;

    async fn load_snapshot(&self) -> AppResult<Snapshot> {
        let books = self.load_books().await?;
        let users = self.load_users().await?;
        Ok(Snapshot::new(books, users))
    }

    /// Replace both collections as one unit: a later load sees either both
    /// old collections or both new ones.
    async fn save_snapshot(&self, snapshot: &Snapshot) -> AppResult<()>;
}

/// Open the store selected in configuration
pub async fn open(config: &StorageConfig) -> AppResult<Arc<dyn Store>> {
    match config.backend {
        StorageBackend::Json => {
            let store = JsonFileStore::open(config.books_path(), config.users_path()).await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
