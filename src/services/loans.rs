//! Loan management service

use chrono::Local;

use crate::{
    config::LoansConfig,
    error::{AppError, AppResult},
    models::Loan,
};

use super::Ledger;

#[derive(Clone)]
pub struct LoansService {
    ledger: Ledger,
    policy: LoansConfig,
}

impl LoansService {
    pub fn new(ledger: Ledger, policy: LoansConfig) -> Self {
        Self { ledger, policy }
    }

    /// Active loans of a user
    pub async fn get_user_loans(&self, user_id: &str) -> AppResult<Vec<Loan>> {
        let _guard = self.ledger.lock().await;
        self.ledger
            .store()
            .load_users()
            .await?
            .into_iter()
            .find(|u| u.user_id == user_id)
            .map(|u| u.borrowed_books)
            .ok_or_else(|| AppError::NotFound("User not found!".to_string()))
    }

    /// Lend a book to a user. Catalog and roster are saved together.
    pub async fn borrow_book(&self, user_id: &str, isbn: &str) -> AppResult<Loan> {
        let _guard = self.ledger.lock().await;
        let store = self.ledger.store();

        let mut snapshot = store.load_snapshot().await?;
        let due_date = self.policy.due_date(Local::now().date_naive());
        let loan = match snapshot.borrow_book(user_id, isbn, due_date) {
            Ok(loan) => loan,
            Err(e) => {
                tracing::debug!("Borrow of {} by {} refused: {}", isbn, user_id, e);
                return Err(e);
            }
        };
        store.save_snapshot(&snapshot).await?;

        tracing::info!("Book {} borrowed by {}, due {}", isbn, user_id, loan.due_date);
        Ok(loan)
    }

    /// Take a book back from a user. Catalog and roster are saved together.
    pub async fn return_book(&self, user_id: &str, isbn: &str) -> AppResult<()> {
        let _guard = self.ledger.lock().await;
        let store = self.ledger.store();

        let mut snapshot = store.load_snapshot().await?;
        if let Err(e) = snapshot.return_book(user_id, isbn) {
            if matches!(e, AppError::BookRecordMissing) {
                tracing::warn!(
                    "User {} holds a loan of {}, which is no longer catalogued",
                    user_id,
                    isbn
                );
            } else {
                tracing::debug!("Return of {} by {} refused: {}", isbn, user_id, e);
            }
            return Err(e);
        }
        store.save_snapshot(&snapshot).await?;

        tracing::info!("Book {} returned by {}", isbn, user_id);
        Ok(())
    }
}
