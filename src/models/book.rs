//! Book (catalog entry) model and related types

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A catalog entry. Each ISBN is a single lendable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    /// `true` while no loan is open on this book
    pub available: bool,
}

impl Book {
    /// A freshly registered book, available for loan
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            available: true,
        }
    }

    /// Case-insensitive substring match on title, author or ISBN (the ISBN
    /// is lowercased too). `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.isbn.to_lowercase().contains(needle)
    }
}

impl From<CreateBook> for Book {
    fn from(req: CreateBook) -> Self {
        Book::new(req.isbn, req.title, req.author)
    }
}

/// Register book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
}

/// Catalog search parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Matched against title, author and ISBN, ignoring case. Empty matches everything.
    pub search_term: Option<String>,
}
