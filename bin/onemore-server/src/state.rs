//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::config::Config;
use crate::entities::SqliteStore;

/// State shared across all HTTP handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Content and submission store.
    pub store: Arc<SqliteStore>,
}

impl AppState {
    pub fn new(config: Config, store: SqliteStore) -> Arc<Self> {
        Arc::new(Self {
            config: Arc::new(config),
            store: Arc::new(store),
        })
    }

    /// Default config over a fresh in-memory store.
    #[cfg(test)]
    pub async fn for_tests() -> Arc<Self> {
        let store = SqliteStore::connect("sqlite::memory:")
            .await
            .expect("in-memory store");
        Self::new(Config::default(), store)
    }
}
