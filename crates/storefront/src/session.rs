//! Per-shopper state.
//!
//! A [`ShopperSession`] is created once when a shopper's session starts and
//! owns the cart, wishlist and theme for that session. All three share one
//! store and one notifier.

use std::sync::Arc;

use tracing::info;

use crate::cart::Cart;
use crate::notify::Notifier;
use crate::storage::KeyValueStore;
use crate::theme::ThemePreference;
use crate::wishlist::Wishlist;

/// Cart, wishlist and theme for one shopper.
#[derive(Debug)]
pub struct ShopperSession {
    cart: Cart,
    wishlist: Wishlist,
    theme: ThemePreference,
}

impl ShopperSession {
    /// Open a session, restoring any saved state from `store`.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        let cart = Cart::open(Arc::clone(&store), Arc::clone(&notifier));
        let wishlist = Wishlist::open(Arc::clone(&store), notifier);
        let theme = ThemePreference::open(store);
        info!(
            cart_lines = cart.len(),
            wishlist_items = wishlist.len(),
            theme = %theme.current(),
            "Shopper session opened"
        );
        Self {
            cart,
            wishlist,
            theme,
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut Wishlist {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    pub const fn theme_mut(&mut self) -> &mut ThemePreference {
        &mut self.theme
    }

    /// Empty the cart and wishlist, as on sign-out. The theme is kept.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.wishlist.clear();
        info!("Shopper session reset");
    }
}

#[cfg(test)]
mod tests {
    use perfumery_core::{Category, Theme};

    use super::*;
    use crate::fixtures;
    use crate::notify::MemoryNotifier;
    use crate::storage::MemoryStore;

    #[test]
    fn test_sessions_share_nothing_but_the_store() {
        let oud = fixtures::product(1, "Golden Oud", 2500, Category::Unisex);

        let mut first = ShopperSession::open(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryNotifier::new()),
        );
        first.cart_mut().add(&oud);

        let second = ShopperSession::open(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryNotifier::new()),
        );
        assert!(second.cart().is_empty());
        assert_eq!(first.cart().len(), 1);
    }

    #[test]
    fn test_reset_keeps_theme() {
        let store = Arc::new(MemoryStore::new());
        let notifier = Arc::new(MemoryNotifier::new());
        let mut session = ShopperSession::open(store.clone(), notifier.clone());

        let rose = fixtures::product(2, "Velvet Rose", 2200, Category::Women);
        session.cart_mut().add(&rose);
        session.wishlist_mut().add(&rose);
        session.theme_mut().set(Theme::Dark);

        session.reset();
        assert!(session.cart().is_empty());
        assert!(session.wishlist().is_empty());

        let reopened = ShopperSession::open(store, notifier);
        assert!(reopened.cart().is_empty());
        assert!(reopened.wishlist().is_empty());
        assert_eq!(reopened.theme().current(), Theme::Dark);
    }
}
