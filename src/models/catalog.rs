//! State transitions over the book collection.
//!
//! These functions only touch an in-memory snapshot; loading and saving is the
//! caller's job.

use crate::error::{AppError, AppResult};

use super::book::Book;

/// Append `book` to the catalog. Rejected if its ISBN is already registered.
pub fn add_book(books: &mut Vec<Book>, book: Book) -> AppResult<()> {
    if books.iter().any(|b| b.isbn == book.isbn) {
        return Err(AppError::Conflict("Book already exists!".to_string()));
    }
    books.push(book);
    Ok(())
}

/// Drop every book with this ISBN. Returns how many were removed (0 is not an error).
pub fn remove_book(books: &mut Vec<Book>, isbn: &str) -> usize {
    let before = books.len();
    books.retain(|b| b.isbn != isbn);
    before - books.len()
}

/// Books matching `term` on title, author or ISBN, in catalog order.
///
/// All three fields are compared ignoring case, the ISBN included, so `x`
/// finds an ISBN with an `X` check digit.
pub fn search_books(books: &[Book], term: &str) -> Vec<Book> {
    let needle = term.to_lowercase();
    books.iter().filter(|b| b.matches(&needle)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Book> {
        vec![
            Book::new("9780261103252", "The Lord of the Rings", "J.R.R. Tolkien"),
            Book::new("9780441013593", "Dune", "Frank Herbert"),
            Book::new("9780261102217", "The Hobbit", "J.R.R. Tolkien"),
            Book::new("030734813X", "Tolkien: A Biography", "Humphrey Carpenter"),
        ]
    }

    #[test]
    fn test_add_book_appends_available() {
        let mut books = catalog();
        add_book(&mut books, Book::new("111", "Solaris", "Lem")).unwrap();

        assert_eq!(books.len(), 5);
        let last = books.last().unwrap();
        assert_eq!(last.isbn, "111");
        assert!(last.available);
    }

    #[test]
    fn test_add_book_rejects_duplicate_isbn() {
        let mut books = catalog();
        let err = add_book(&mut books, Book::new("9780441013593", "Other", "Someone")).unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.to_string(), "Book already exists!");
        assert_eq!(books, catalog());
    }

    #[test]
    fn test_remove_book_is_idempotent() {
        let mut once = catalog();
        assert_eq!(remove_book(&mut once, "9780441013593"), 1);

        let mut twice = once.clone();
        assert_eq!(remove_book(&mut twice, "9780441013593"), 0);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_remove_unknown_isbn() {
        let mut books = catalog();
        assert_eq!(remove_book(&mut books, "nope"), 0);
        assert_eq!(books, catalog());
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let found = search_books(&catalog(), "TOLKIEN");
        let isbns: Vec<_> = found.iter().map(|b| b.isbn.as_str()).collect();

        // Two by author, one by title
        assert_eq!(isbns, vec!["9780261103252", "9780261102217", "030734813X"]);
    }

    #[test]
    fn test_search_by_isbn_fragment() {
        let found = search_books(&catalog(), "0441");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Dune");

        let found = search_books(&catalog(), "813x");
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_empty_search_returns_everything() {
        assert_eq!(search_books(&catalog(), ""), catalog());
    }

    #[test]
    fn test_search_no_match() {
        assert!(search_books(&catalog(), "asimov").is_empty());
    }
}
