//! In-process store. Nothing survives a restart.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    error::AppResult,
    models::{Book, Snapshot, User},
};

use super::Store;

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `snapshot`
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(snapshot),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.read().await.books.clone())
    }

    async fn load_users(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.clone())
    }

    async fn save_books(&self, books: &[Book]) -> AppResult<()> {
        self.state.write().await.books = books.to_vec();
        Ok(())
    }

    async fn save_users(&self, users: &[User]) -> AppResult<()> {
        self.state.write().await.users = users.to_vec();
        Ok(())
    }

    async fn load_snapshot(&self) -> AppResult<Snapshot> {
        Ok(self.state.read().await.clone())
    }

    async fn save_snapshot(&self, snapshot: &Snapshot) -> AppResult<()> {
        *self.state.write().await = snapshot.clone();
        Ok(())
    }
}
