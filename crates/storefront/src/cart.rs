//! Shopping cart.
//!
//! The cart owns an ordered list of [`CartLine`]s and writes the whole list
//! to storage after every mutation. Operations never fail: unknown IDs are
//! no-ops and storage problems are logged by the snapshot helpers.

use std::collections::HashSet;
use std::fmt;
use std::num::NonZeroU32;
use std::sync::Arc;

use perfumery_core::{CartLine, Price, Product, ProductId};
use tracing::debug;

use crate::notify::{Notifier, Toast};
use crate::storage::{KeyValueStore, keys, load_snapshot, save_snapshot};

/// What [`Cart::add`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was inserted with quantity 1.
    Added,
    /// An existing line's quantity was increased by one.
    Incremented { quantity: NonZeroU32 },
}

/// The shopper's cart.
pub struct Cart {
    lines: Vec<CartLine>,
    store: Arc<dyn KeyValueStore>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Cart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cart")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

impl Cart {
    /// Open the cart, restoring the last saved snapshot if there is one.
    ///
    /// A missing or unreadable snapshot yields an empty cart.
    #[must_use]
    pub fn open(store: Arc<dyn KeyValueStore>, notifier: Arc<dyn Notifier>) -> Self {
        let saved: Vec<CartLine> = load_snapshot(store.as_ref(), keys::CART);

        // A hand-edited snapshot could repeat an ID; keep the first line
        let mut seen = HashSet::new();
        let lines: Vec<CartLine> = saved
            .into_iter()
            .filter(|line| seen.insert(line.id()))
            .collect();

        debug!(lines = lines.len(), "Cart restored");
        Self {
            lines,
            store,
            notifier,
        }
    }

    /// Add one unit of `product`.
    pub fn add(&mut self, product: &Product) -> AddOutcome {
        let outcome = if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(1);
            AddOutcome::Incremented {
                quantity: line.quantity,
            }
        } else {
            self.lines.push(CartLine::new(product.clone()));
            AddOutcome::Added
        };

        self.persist();
        match outcome {
            AddOutcome::Added => self.notifier.notify(Toast::new(
                "Added to cart",
                format!("{} has been added to your cart", product.name),
            )),
            AddOutcome::Incremented { .. } => self.notifier.notify(Toast::new(
                "Updated cart",
                format!("Increased quantity of {}", product.name),
            )),
        }
        outcome
    }

    /// Remove the line for `id`. Absent IDs are a no-op apart from the toast.
    pub fn remove(&mut self, id: ProductId) {
        self.lines.retain(|line| line.id() != id);
        self.persist();
        self.notifier.notify(Toast::new(
            "Removed from cart",
            "Item has been removed from your cart",
        ));
    }

    /// Set the quantity for `id` to exactly `quantity`.
    ///
    /// A quantity of zero or less removes the line. Absent IDs are a no-op.
    pub fn update_quantity(&mut self, id: ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);

        if let Some(line) = self.line_mut(id) {
            line.quantity = quantity;
            self.persist();
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.persist();
        self.notifier.notify(Toast::new(
            "Cart cleared",
            "All items have been removed from your cart",
        ));
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    /// Whether `id` has a line.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.lines.iter().any(|line| line.id() == id)
    }

    /// Quantity for `id`, if present.
    #[must_use]
    pub fn quantity_of(&self, id: ProductId) -> Option<NonZeroU32> {
        self.lines
            .iter()
            .find(|line| line.id() == id)
            .map(|line| line.quantity)
    }

    pub(crate) fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id() == id)
    }

    fn persist(&self) {
        save_snapshot(self.store.as_ref(), keys::CART, &self.lines);
    }
}
