//! Shelfmark Library Catalog
//!
//! A small library catalog and lending server: register and remove books,
//! search the catalog, and track which user has borrowed which book. State
//! lives in two flat JSON files and is exposed through a REST JSON API.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Build services over `store` using the loan policy from `config`
    pub fn new(config: AppConfig, store: Arc<dyn repository::Store>) -> Self {
        let services = services::Services::new(store, config.loans.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
