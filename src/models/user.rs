//! User (borrower) model and related types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::loan::Loan;

/// A borrower and the loans currently open in their name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub user_id: String,
    /// Active loans, oldest first
    #[serde(default)]
    pub borrowed_books: Vec<Loan>,
}

impl User {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            borrowed_books: Vec::new(),
        }
    }

    pub fn has_borrowed(&self, isbn: &str) -> bool {
        self.borrowed_books.iter().any(|loan| loan.isbn == isbn)
    }
}

/// Provision user request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
}
