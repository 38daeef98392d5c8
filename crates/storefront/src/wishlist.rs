//! Wishlist.
//!
//! An ordered set of saved products, persisted under its own key with the
//! same discipline as the cart. Adding a product that is already saved
//! removes it instead.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use perfumery_core::{Product, ProductId};
use tracing::debug;

use crate::notify::{Notifier, Toast};
use crate::storage::{KeyValueStore, keys, load_snapshot, save_snapshot};

/// What [`Wishlist::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WishlistToggle {
    Added,
    Removed,
}

/// The shopper's wishlist.
pub struct Wishlist {
    items: Vec<Product>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Wishlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wishlist")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl Wishlist {
    /// Open the wishlist, restoring the last saved snapshot if there is one.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        let saved: Vec<Product> = load_snapshot(store.as_ref(), keys::WISHLIST);

        let mut seen = HashSet::new();
        let items: Vec<Product> = saved
            .into_iter()
            .filter(|product| seen.insert(product.id))
            .collect();

        debug!(items = items.len(), "Wishlist restored");
        Self {
            items,
            store,
            notifier,
        }
    }

    /// Save `product`, or remove it if it is already saved.
    pub fn add(&mut self, product: &Product) -> WishlistToggle {
        if self.contains(product.id) {
            self.remove(product.id, &product.name);
            return WishlistToggle::Removed;
        }

        self.items.push(product.clone());
        self.persist();
        self.notifier.notify(Toast::new(
            "Added to wishlist",
            format!("{} has been added to your wishlist", product.name),
        ));
        WishlistToggle::Added
    }

    /// Remove `id` and return the remaining entries.
    ///
    /// The toast uses `name` as given, whether or not `id` was present.
    pub fn remove(&mut self, id: ProductId, name: &str) -> &[Product] {
        self.items.retain(|product| product.id != id);
        self.persist();
        self.notifier.notify(Toast::new(
            "Removed from wishlist",
            format!("{name} has been removed from your wishlist"),
        ));
        &self.items
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.notifier.notify(Toast::new(
            "Wishlist cleared",
            "All items have been removed from your wishlist",
        ));
    }

    /// Saved products in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` is saved.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|product| product.id == id)
    }

    fn persist(&self) {
        save_snapshot(self.store.as_ref(), keys::WISHLIST, &self.items);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use perfumery_core::Category;

    use super::*;
    use crate::fixtures;
    use crate::notify::MemoryNotifier;
    use crate::storage::MemoryStore;

    fn open() -> (Wishlist, Arc<MemoryStore>, Arc<MemoryNotifier>) {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let wishlist = Wishlist::open(store.clone(), notifier.clone());
        (wishlist, store, notifier)
    }

    fn rose() -> Product {
        fixtures::product(2, "Velvet Rose", 2200, Category::Women)
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let (mut wishlist, store, notifier) = open();
        let oud = fixtures::product(1, "Golden Oud", 2500, Category::Unisex);
        wishlist.add(&oud);
        let before: Vec<Product> = wishlist.items().to_vec();

        assert_eq!(wishlist.add(&rose()), WishlistToggle::Added);
        assert_eq!(wishlist.add(&rose()), WishlistToggle::Removed);
        assert_eq!(wishlist.items(), before.as_slice());

        // The removal is persisted, not just applied in memory
        let reopened = Wishlist::open(store, notifier);
        assert_eq!(reopened.items(), before.as_slice());
    }

    #[test]
    fn test_toggle_notifications() {
        let (mut wishlist, _, notifier) = open();
        wishlist.add(&rose());
        wishlist.add(&rose());
        assert_eq!(
            notifier.toasts(),
            vec![
                Toast::new("Added to wishlist", "Velvet Rose has been added to your wishlist"),
                Toast::new(
                    "Removed from wishlist",
                    "Velvet Rose has been removed from your wishlist"
                ),
            ]
        );
    }

    #[test]
    fn test_remove_uses_supplied_name_and_returns_rest() {
        let (mut wishlist, _, notifier) = open();
        let oud = fixtures::product(1, "Golden Oud", 2500, Category::Unisex);
        wishlist.add(&oud);
        wishlist.add(&rose());

        let remaining = wishlist.remove(ProductId::new(2), "That Rose");
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining.first().map(|p| p.id), Some(ProductId::new(1)));
        assert_eq!(
            notifier.last().map(|t| t.description),
            Some("That Rose has been removed from your wishlist".to_string())
        );
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (mut wishlist, _, _) = open();
        wishlist.add(&rose());
        assert_eq!(wishlist.remove(ProductId::new(42), "Ghost").len(), 1);
    }

    #[test]
    fn test_clear_persists_empty() {
        let (mut wishlist, store, notifier) = open();
        wishlist.add(&rose());
        wishlist.clear();
        assert!(wishlist.is_empty());
        assert_eq!(
            notifier.last().map(|t| t.title),
            Some("Wishlist cleared".to_string())
        );
        assert_eq!(store.get(keys::WISHLIST).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_snapshot_has_no_quantity() {
        let (mut wishlist, store, _) = open();
        wishlist.add(&rose());
        let raw = store.get(keys::WISHLIST).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = value.get(0).unwrap();
        assert!(first.get("quantity").is_none());
        assert_eq!(first.get("category").and_then(|c| c.as_str()), Some("women"));
    }
}
