//! User (roster) service

use crate::{
    error::{AppError, AppResult},
    models::{lending, User},
};

use super::Ledger;

#[derive(Clone)]
pub struct UsersService {
    ledger: Ledger,
}

impl UsersService {
    pub fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// Every user with their active loans
    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        let _guard = self.ledger.lock().await;
        self.ledger.store().load_users().await
    }

    pub async fn get_user(&self, user_id: &str) -> AppResult<User> {
        let _guard = self.ledger.lock().await;
        self.ledger
            .store()
            .load_users()
            .await?
            .into_iter()
            .find(|u| u.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("User not found!".to_string()))
    }

    /// Provision a borrower with no loans
    pub async fn create_user(&self, user_id: &str) -> AppResult<User> {
        let _guard = self.ledger.lock().await;
        let store = self.ledger.store();

        let user = User::new(user_id);
        let mut users = store.load_users().await?;
        lending::add_user(&mut users, user.clone())?;
        store.save_users(&users).await?;

        tracing::info!("Provisioned user {}", user_id);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_and_fetch() {
        let users = UsersService::new(Ledger::new(Arc::new(MemoryStore::new())));

        users.create_user("u1").await.unwrap();
        assert!(matches!(users.create_user("u1").await, Err(AppError::Conflict(_))));

        assert_eq!(users.get_user("u1").await.unwrap(), User::new("u1"));
        assert_eq!(users.list_users().await.unwrap().len(), 1);
        assert!(matches!(users.get_user("u2").await, Err(AppError::NotFound(_))));
    }
}
