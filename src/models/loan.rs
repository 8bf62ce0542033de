//! Loan (borrow) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// An active loan, stored inside the borrowing user's record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Loan {
    pub isbn: String,
    /// Serialized as `YYYY-MM-DD`
    #[schema(value_type = String, format = Date, example = "2024-03-01")]
    pub due_date: NaiveDate,
}

/// Borrow or return request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoanRequest {
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
}
