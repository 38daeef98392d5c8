//! Integration tests for Perfumery.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p perfumery-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopper_flow` - Session scenarios over a file-backed store
//! - `backend_catalog` - Catalog loading from a mock backend

use std::path::Path;
use std::sync::Arc;

use perfumery_storefront::catalog::{ProductCatalog, SeedSource};
use perfumery_storefront::notify::MemoryNotifier;
use perfumery_storefront::session::ShopperSession;
use perfumery_storefront::storage::FileStore;
use tempfile::TempDir;

/// A shopper whose state lives in a temporary directory.
pub struct TestShopper {
    dir: TempDir,
    pub notifier: Arc<MemoryNotifier>,
    pub session: ShopperSession,
}

impl TestShopper {
    /// Start a fresh shopper with an empty data directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let notifier = Arc::new(MemoryNotifier::new());
        let session = open_session(dir.path(), &notifier);
        Self {
            dir,
            notifier,
            session,
        }
    }

    /// The data directory.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.dir.path()
    }

    /// Drop the current session and open a new one over the same directory,
    /// as on a page reload.
    pub fn reload(&mut self) {
        self.session = open_session(self.dir.path(), &self.notifier);
    }
}

impl Default for TestShopper {
    fn default() -> Self {
        Self::new()
    }
}

fn open_session(dir: &Path, notifier: &Arc<MemoryNotifier>) -> ShopperSession {
    ShopperSession::open(Arc::new(FileStore::new(dir)), notifier.clone())
}

/// The bundled seed catalog.
///
/// # Panics
///
/// Panics if the bundled dataset does not parse.
#[allow(clippy::expect_used)]
pub async fn seed_catalog() -> ProductCatalog {
    ProductCatalog::load(&SeedSource)
        .await
        .expect("bundled catalog loads")
}
