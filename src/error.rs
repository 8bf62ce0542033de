//! Error types for Shelfmark server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Numeric codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    StorageFailure = 1,
    CorruptData = 2,
    NoSuchRecord = 3,
    AlreadyExists = 4,
    BookNotAvailable = 5,
    NotBorrowed = 6,
    BookRecordMissing = 7,
    BadValue = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A record with the same key already exists
    #[error("{0}")]
    Conflict(String),

    /// The user or book named in the request does not exist
    #[error("{0}")]
    NotFound(String),

    #[error("Book is currently unavailable!")]
    Unavailable,

    #[error("This book was not borrowed by the user.")]
    NotBorrowed,

    /// The user holds a loan for a book that has since been removed from the catalog
    #[error("The borrowed book is no longer in the catalog.")]
    BookRecordMissing,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Conflict(_) => ErrorCode::AlreadyExists,
            AppError::NotFound(_) => ErrorCode::NoSuchRecord,
            AppError::Unavailable => ErrorCode::BookNotAvailable,
            AppError::NotBorrowed => ErrorCode::NotBorrowed,
            AppError::BookRecordMissing => ErrorCode::BookRecordMissing,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Io(_) => ErrorCode::StorageFailure,
            AppError::Parse(_) => ErrorCode::CorruptData,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Conflict(_)
            | AppError::NotFound(_)
            | AppError::Unavailable
            | AppError::NotBorrowed
            | AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::BookRecordMissing => (StatusCode::CONFLICT, self.to_string()),
            AppError::Io(e) => {
                tracing::error!("Storage error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            AppError::Parse(e) => {
                tracing::error!("Corrupt data file: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Stored data could not be read".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
