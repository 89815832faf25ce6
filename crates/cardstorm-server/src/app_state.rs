//! Shared application state.
//!
//! Owns the single `SeriesStore` for the process; handlers reach it through
//! axum state, never through a global.

use std::sync::Arc;

use cardstorm_core::SeriesStore;

use crate::config::CardstormConfig;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<SeriesStore>,
}

struct AppStateInner {
    cfg: CardstormConfig,
}

impl AppState {
    /// Build application state with an empty store.
    pub fn new(cfg: CardstormConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            store: Arc::new(SeriesStore::new()),
        }
    }

    pub fn cfg(&self) -> &CardstormConfig {
        &self.inner.cfg
    }

    /// Shared handle, for work moved onto the blocking pool.
    pub fn store(&self) -> Arc<SeriesStore> {
        Arc::clone(&self.store)
    }
}
