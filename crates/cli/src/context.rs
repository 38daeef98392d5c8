//! Everything a command needs: configuration, catalog and shopper session.

use std::sync::Arc;

use perfumery_core::{Product, ProductId};
use perfumery_storefront::catalog::ProductCatalog;
use perfumery_storefront::config::StorefrontConfig;
use perfumery_storefront::notify::MemoryNotifier;
use perfumery_storefront::session::ShopperSession;
use perfumery_storefront::storage::FileStore;
use perfumery_storefront::{AppError, Result};

use crate::output;

pub struct Context {
    pub config: StorefrontConfig,
    pub catalog: ProductCatalog,
    pub session: ShopperSession,
    notifier: Arc<MemoryNotifier>,
}

impl Context {
    /// Load configuration and catalog, and open the file-backed session.
    pub async fn load() -> Result<Self> {
        let config = StorefrontConfig::from_env()?;
        let catalog = ProductCatalog::load_configured(&config.catalog).await?;

        let notifier = Arc::new(MemoryNotifier::new());
        let store = Arc::new(FileStore::new(config.data_dir.clone()));
        let session = ShopperSession::open(store, notifier.clone());

        Ok(Self {
            config,
            catalog,
            session,
            notifier,
        })
    }

    /// Print and discard toasts raised so far.
    pub fn flush_toasts(&self) {
        for toast in self.notifier.drain() {
            output::toast(&toast);
        }
    }
}

/// Look up a product or fail with `NotFound`.
pub fn find(catalog: &ProductCatalog, id: ProductId) -> Result<&Product> {
    catalog
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
