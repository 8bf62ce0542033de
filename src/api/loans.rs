//! Loan management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::loan::{Loan, LoanRequest},
};

/// Loan response with due date
#[derive(Serialize, ToSchema)]
pub struct LoanResponse {
    pub user_id: String,
    pub isbn: String,
    /// Due date (YYYY-MM-DD)
    #[schema(value_type = String, format = Date)]
    pub due_date: NaiveDate,
    /// Status message
    pub message: String,
}

/// Return response
#[derive(Serialize, ToSchema)]
pub struct ReturnResponse {
    /// Return status
    pub status: String,
    pub user_id: String,
    pub isbn: String,
}

/// Get active loans for a user
#[utoipa::path(
    get,
    path = "/users/{user_id}/loans",
    tag = "loans",
    params(
        ("user_id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User's active loans", body = Vec<Loan>),
        (status = 400, description = "User not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_user_loans(
    State(state): State<crate::AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Loan>>> {
    let loans = state.services.loans.get_user_loans(&user_id).await?;
    Ok(Json(loans))
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/loans",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 201, description = "Loan created", body = LoanResponse),
        (
            status = 400,
            description = "User or book not found, or book unavailable",
            body = crate::error::ErrorResponse
        )
    )
)]
pub async fn create_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<(StatusCode, Json<LoanResponse>)> {
    request.validate()?;

    let loan = state
        .services
        .loans
        .borrow_book(&request.user_id, &request.isbn)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LoanResponse {
            user_id: request.user_id,
            isbn: loan.isbn,
            due_date: loan.due_date,
            message: "Book borrowed successfully".to_string(),
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/loans/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = ReturnResponse),
        (
            status = 400,
            description = "User not found or book not borrowed by the user",
            body = crate::error::ErrorResponse
        ),
        (
            status = 409,
            description = "Book no longer in the catalog",
            body = crate::error::ErrorResponse
        )
    )
)]
pub async fn return_loan(
    State(state): State<crate::AppState>,
    Json(request): Json<LoanRequest>,
) -> AppResult<Json<ReturnResponse>> {
    request.validate()?;

    state
        .services
        .loans
        .return_book(&request.user_id, &request.isbn)
        .await?;

    Ok(Json(ReturnResponse {
        status: "returned".to_string(),
        user_id: request.user_id,
        isbn: request.isbn,
    }))
}
