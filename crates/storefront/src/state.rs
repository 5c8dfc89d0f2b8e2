//! Application state shared across handlers.

use std::sync::Arc;

use campus_market_core::Product;

use crate::catalog::CatalogLoader;
use crate::config::MarketConfig;
use crate::db::KeyValueStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration, the local store, and the catalog loader.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: MarketConfig,
    store: Arc<dyn KeyValueStore>,
    catalog: CatalogLoader,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Device-local key-value store
    #[must_use]
    pub fn new(config: MarketConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let catalog = CatalogLoader::new(config.catalog.clone(), config.catalog_delay);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &MarketConfig {
        &self.inner.config
    }

    /// Get a reference to the local store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.inner.store.as_ref()
    }

    /// Get a reference to the catalog loader.
    #[must_use]
    pub fn catalog(&self) -> &CatalogLoader {
        &self.inner.catalog
    }

    /// Load the merged catalog (static products, then published listings).
    pub async fn products(&self) -> Vec<Product> {
        self.catalog().load(self.store()).await
    }
}
