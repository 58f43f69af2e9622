//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::SiteConfig;
use crate::store::ContentStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The content store sits
/// behind a read/write lock so mutations (and their persist) are
/// serialized.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    store: RwLock<ContentStore>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: SiteConfig, store: ContentStore) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store: RwLock::new(store),
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the locked content store.
    #[must_use]
    pub fn store(&self) -> &RwLock<ContentStore> {
        &self.inner.store
    }
}
