//! Business logic services

pub mod catalog;
pub mod loans;
pub mod users;

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::{config::LoansConfig, repository::Store};

/// Store handle shared by all services.
///
/// Every operation holds the guard from its first load to its last save, so
/// load-mutate-save cycles never interleave.
#[derive(Clone)]
pub struct Ledger {
    store: Arc<dyn Store>,
    guard: Arc<Mutex<()>>,
}

impl Ledger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            guard: Arc::new(Mutex::new(())),
        }
    }

    /// Begin an operation; released when the returned guard drops
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.guard.lock().await
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn Store>, loans_config: LoansConfig) -> Self {
        let ledger = Ledger::new(store);
        Self {
            catalog: catalog::CatalogService::new(ledger.clone()),
            loans: loans::LoansService::new(ledger.clone(), loans_config),
            users: users::UsersService::new(ledger),
        }
    }
}
