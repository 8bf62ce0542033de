//! Data models for Shelfmark

pub mod book;
pub mod catalog;
pub mod lending;
pub mod loan;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookQuery, CreateBook};
pub use lending::Snapshot;
pub use loan::{Loan, LoanRequest};
pub use user::{CreateUser, User};
