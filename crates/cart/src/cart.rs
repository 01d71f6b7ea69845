//! The shopper's cart session.
//!
//! A [`Cart`] owns its line items and the store that mirrors them. It is
//! created when a storefront session starts ([`Cart::open`]) and handed back
//! when the session ends ([`Cart::end_session`]); nothing about it is global,
//! so any number of carts can exist side by side.
//!
//! Every mutation returns a [`CartEvent`] on success or a [`CartError`] on
//! refusal. A refused mutation leaves the cart untouched. Turning either into
//! something the shopper sees is [`crate::notify`]'s job.

use chrono::{DateTime, Duration, Utc};
use fanzon_core::{Money, ProductId, ProductSnapshot};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::checkout::{self, ProductSource, Revalidation};
use crate::config::CartConfig;
use crate::error::CartError;
use crate::pricing::{self, CartSummary};
use crate::storage::CartStorage;
use crate::store::CartStore;

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product data as of when it was added (or last revalidated).
    pub product: ProductSnapshot,
    /// Units of the product, always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.product.unit_price() * self.quantity
    }
}

/// What a successful mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    Added {
        product_id: ProductId,
        title: String,
        quantity: u32,
    },
    /// An existing line grew.
    QuantityIncreased {
        product_id: ProductId,
        title: String,
        added: u32,
        quantity: u32,
    },
    /// An existing line's quantity was overwritten.
    QuantityUpdated {
        product_id: ProductId,
        title: String,
        quantity: u32,
    },
    /// A line's unit price moved when its snapshot was refreshed.
    PriceChanged {
        product_id: ProductId,
        title: String,
        previous: Money,
        current: Money,
    },
    /// A line was dropped.
    Removed { product_id: ProductId, title: String },
    /// Every line was dropped.
    Cleared { lines: usize },
    /// Nothing matched, nothing changed.
    Unchanged,
}

/// Whether [`Cart::end_session`] should wipe the persisted cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearOnExit {
    /// Leave the stored cart for the next session.
    #[default]
    Keep,
    /// Delete the stored cart.
    Clear,
}

/// A shopping cart bound to a storage backend.
#[derive(Debug)]
pub struct Cart<S: CartStorage> {
    lines: Vec<CartLine>,
    store: CartStore<S>,
    shipping_fee: Money,
    snapshot_max_age: Duration,
}

impl<S: CartStorage> Cart<S> {
    /// Start a cart session, restoring whatever `storage` holds under the
    /// configured key.
    pub fn open(storage: S, config: &CartConfig) -> Self {
        let store = CartStore::new(storage, config.storage_key.clone());
        let lines = store.load();
        info!(key = %store.key(), lines = lines.len(), "Cart session opened");

        Self {
            lines,
            store,
            shipping_fee: config.shipping_fee,
            snapshot_max_age: config.snapshot_max_age,
        }
    }

    /// End the session and return the storage backend.
    pub fn end_session(mut self, on_exit: ClearOnExit) -> S {
        if on_exit == ClearOnExit::Clear {
            self.lines.clear();
            self.store.discard();
        }
        info!(key = %self.store.key(), ?on_exit, "Cart session ended");
        self.store.into_storage()
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add `quantity` units of `product`.
    ///
    /// If the product already has a line, its quantity grows and the stored
    /// snapshot is kept; otherwise a new line is appended with `product` as
    /// its snapshot.
    ///
    /// # Errors
    ///
    /// - `CartError::InvalidQuantity` if `quantity` is zero.
    /// - `CartError::InsufficientStock` if `quantity` exceeds the product's
    ///   stock, or if the line's resulting quantity would exceed the stock
    ///   recorded on its snapshot.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(
        &mut self,
        product: ProductSnapshot,
        quantity: u32,
    ) -> Result<CartEvent, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if quantity > product.stock_count {
            warn!(requested = quantity, available = product.stock_count, "Add refused");
            return Err(CartError::InsufficientStock {
                product_id: product.id,
                requested: quantity,
                available: product.stock_count,
            });
        }

        let event = if let Some(line) = self.line_mut(&product.id) {
            let requested = line.quantity.saturating_add(quantity);
            let available = line.product.stock_count;
            if requested > available {
                warn!(requested, available, "Add refused");
                return Err(CartError::InsufficientStock {
                    product_id: product.id,
                    requested,
                    available,
                });
            }
            line.quantity = requested;
            CartEvent::QuantityIncreased {
                product_id: product.id,
                title: line.product.title.clone(),
                added: quantity,
                quantity: requested,
            }
        } else {
            let event = CartEvent::Added {
                product_id: product.id.clone(),
                title: product.title.clone(),
                quantity,
            };
            self.lines.push(CartLine { product, quantity });
            event
        };

        debug!(?event, "Cart updated");
        self.persist();
        Ok(event)
    }

    /// Remove the line for `product_id`, if there is one.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> CartEvent {
        let Some(index) = self.position(product_id) else {
            return CartEvent::Unchanged;
        };

        let line = self.lines.remove(index);
        debug!(%product_id, "Removed from cart");
        self.persist();
        CartEvent::Removed {
            product_id: line.product.id,
            title: line.product.title,
        }
    }

    /// Set the quantity of the line for `product_id`.
    ///
    /// A quantity of zero removes the line. Unknown products are ignored.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InsufficientStock` if `quantity` exceeds the stock
    /// recorded on the line's snapshot.
    #[instrument(skip(self))]
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<CartEvent, CartError> {
        if quantity < 1 {
            return Ok(self.remove_from_cart(product_id));
        }

        let Some(line) = self.line_mut(product_id) else {
            return Ok(CartEvent::Unchanged);
        };

        let available = line.product.stock_count;
        if quantity > available {
            warn!(requested = quantity, available, "Update refused");
            return Err(CartError::InsufficientStock {
                product_id: product_id.clone(),
                requested: quantity,
                available,
            });
        }

        line.quantity = quantity;
        let event = CartEvent::QuantityUpdated {
            product_id: product_id.clone(),
            title: line.product.title.clone(),
            quantity,
        };
        debug!(quantity, "Quantity updated");
        self.persist();
        Ok(event)
    }

    /// Drop every line.
    pub fn clear_cart(&mut self) -> CartEvent {
        let lines = self.lines.len();
        self.lines.clear();
        debug!(lines, "Cart cleared");
        self.persist();
        CartEvent::Cleared { lines }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns `true` if `product_id` has a line.
    #[must_use]
    pub fn is_in_cart(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    /// Quantity held for `product_id`, zero if absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|line| &line.product.id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        pricing::subtotal(&self.lines)
    }

    /// Flat shipping fee, or zero for an empty cart.
    #[must_use]
    pub fn shipping_fee(&self) -> Money {
        pricing::shipping_fee(&self.lines, self.shipping_fee)
    }

    /// Subtotal plus shipping fee.
    #[must_use]
    pub fn total(&self) -> Money {
        pricing::total(&self.lines, self.shipping_fee)
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        pricing::item_count(&self.lines)
    }

    /// All four figures at once.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.lines, self.shipping_fee)
    }

    // =========================================================================
    // Snapshot revalidation
    // =========================================================================

    /// Lines whose snapshot is older than the configured maximum age at `now`.
    #[must_use]
    pub fn stale_lines(&self, now: DateTime<Utc>) -> Vec<&CartLine> {
        self.lines
            .iter()
            .filter(|line| line.product.is_stale(self.snapshot_max_age, now))
            .collect()
    }

    /// Compare every line against `source`.
    #[must_use]
    pub fn revalidate<P: ProductSource + ?Sized>(
        &self,
        source: &P,
        now: DateTime<Utc>,
    ) -> Revalidation {
        checkout::revalidate(&self.lines, source, self.snapshot_max_age, now)
    }

    /// Bring the cart in line with a revalidation.
    ///
    /// Lines whose product vanished or sold out are removed, every other
    /// checked line takes the fresh snapshot, and quantities above the fresh
    /// stock are clamped down to it. Price moves are reported as events too.
    pub fn apply_revalidation(&mut self, revalidation: &Revalidation) -> Vec<CartEvent> {
        let mut events = Vec::new();

        for check in revalidation.checks() {
            let Some(index) = self.position(&check.product_id) else {
                continue;
            };

            match &check.current {
                Some(current) if current.stock_count > 0 => {
                    let Some(line) = self.lines.get_mut(index) else {
                        continue;
                    };
                    let previous = line.product.unit_price();
                    line.product = current.clone();
                    if previous != current.unit_price() {
                        events.push(CartEvent::PriceChanged {
                            product_id: check.product_id.clone(),
                            title: current.title.clone(),
                            previous,
                            current: current.unit_price(),
                        });
                    }
                    if line.quantity > current.stock_count {
                        line.quantity = current.stock_count;
                        events.push(CartEvent::QuantityUpdated {
                            product_id: check.product_id.clone(),
                            title: current.title.clone(),
                            quantity: current.stock_count,
                        });
                    }
                }
                _ => {
                    let line = self.lines.remove(index);
                    events.push(CartEvent::Removed {
                        product_id: line.product.id,
                        title: line.product.title,
                    });
                }
            }
        }

        info!(changes = events.len(), "Applied revalidation");
        self.persist();
        events
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| &line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }

    fn persist(&mut self) {
        self.store.save(&self.lines);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn p1() -> ProductSnapshot {
        ProductSnapshot::new("p1", "Lawn Suit", Money::from_rupees(1000), 5)
    }

    fn open() -> Cart<MemoryStorage> {
        Cart::open(MemoryStorage::default(), &CartConfig::default())
    }

    #[test]
    fn test_add_new_line() {
        let mut cart = open();
        let event = cart.add_to_cart(p1(), 3).unwrap();

        assert!(matches!(event, CartEvent::Added { quantity: 3, .. }));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::new("p1")), 3);
    }

    #[test]
    fn test_add_over_stock_refused() {
        let mut cart = open();
        let err = cart.add_to_cart(p1(), 6).unwrap_err();

        assert_eq!(
            err,
            CartError::InsufficientStock {
                product_id: ProductId::new("p1"),
                requested: 6,
                available: 5,
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_zero_refused() {
        let mut cart = open();
        assert_eq!(cart.add_to_cart(p1(), 0), Err(CartError::InvalidQuantity));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_existing_increases_quantity() {
        let mut cart = open();
        cart.add_to_cart(p1(), 2).unwrap();
        let event = cart.add_to_cart(p1(), 2).unwrap();

        assert!(matches!(
            event,
            CartEvent::QuantityIncreased {
                added: 2,
                quantity: 4,
                ..
            }
        ));
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_add_existing_over_stock_refused() {
        let mut cart = open();
        cart.add_to_cart(p1(), 3).unwrap();
        let err = cart.add_to_cart(p1(), 4).unwrap_err();

        assert!(matches!(
            err,
            CartError::InsufficientStock {
                requested: 7,
                available: 5,
                ..
            }
        ));
        assert_eq!(cart.quantity_of(&ProductId::new("p1")), 3);
    }

    #[test]
    fn test_add_existing_checks_stored_snapshot() {
        let mut cart = open();
        cart.add_to_cart(p1(), 3).unwrap();

        // A fresher snapshot with more stock does not lift the ceiling of the
        // line that is already in the cart.
        let mut restocked = p1();
        restocked.stock_count = 50;
        assert!(cart.add_to_cart(restocked, 3).is_err());
        assert_eq!(cart.lines()[0].product.stock_count, 5);
    }

    #[test]
    fn test_repeated_single_adds_stop_at_stock() {
        let mut cart = open();
        let mut accepted = 0;
        for _ in 0..10 {
            if cart.add_to_cart(p1(), 1).is_ok() {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 5);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_remove_absent_is_unchanged() {
        let mut cart = open();
        assert_eq!(
            cart.remove_from_cart(&ProductId::new("nope")),
            CartEvent::Unchanged
        );
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = open();
        cart.add_to_cart(p1(), 1).unwrap();
        let event = cart.update_quantity(&ProductId::new("p1"), 4).unwrap();

        assert!(matches!(event, CartEvent::QuantityUpdated { quantity: 4, .. }));
        assert_eq!(cart.item_count(), 4);
    }

    #[test]
    fn test_update_quantity_over_stock_refused() {
        let mut cart = open();
        cart.add_to_cart(p1(), 1).unwrap();
        assert!(cart.update_quantity(&ProductId::new("p1"), 6).is_err());
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = open();
        cart.add_to_cart(p1(), 2).unwrap();
        let event = cart.update_quantity(&ProductId::new("p1"), 0).unwrap();

        assert!(matches!(event, CartEvent::Removed { .. }));
        assert!(!cart.is_in_cart(&ProductId::new("p1")));
    }

    #[test]
    fn test_update_quantity_absent_is_unchanged() {
        let mut cart = open();
        assert_eq!(
            cart.update_quantity(&ProductId::new("p1"), 2),
            Ok(CartEvent::Unchanged)
        );
    }

    #[test]
    fn test_clear_cart() {
        let mut cart = open();
        cart.add_to_cart(p1(), 1).unwrap();
        cart.add_to_cart(
            ProductSnapshot::new("p2", "Kurta", Money::from_rupees(2500), 1),
            1,
        )
        .unwrap();

        assert_eq!(cart.clear_cart(), CartEvent::Cleared { lines: 2 });
        assert!(cart.is_empty());
    }

    #[test]
    fn test_mutations_write_through() {
        let mut storage = MemoryStorage::default();
        {
            let mut cart = Cart::open(&mut storage, &CartConfig::default());
            cart.add_to_cart(p1(), 2).unwrap();
        }
        let stored = storage.get("fanzon-cart").unwrap();
        let lines: Vec<CartLine> = serde_json::from_str(stored).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
    }

    #[test]
    fn test_refused_mutation_does_not_write() {
        let mut cart = open();
        assert!(cart.add_to_cart(p1(), 9).is_err());
        assert_eq!(cart.store().storage().get("fanzon-cart"), None);
    }

    #[test]
    fn test_end_session_keep() {
        let mut cart = open();
        cart.add_to_cart(p1(), 2).unwrap();
        let storage = cart.end_session(ClearOnExit::Keep);

        let reopened = Cart::open(storage, &CartConfig::default());
        assert_eq!(reopened.item_count(), 2);
    }

    #[test]
    fn test_end_session_clear() {
        let mut cart = open();
        cart.add_to_cart(p1(), 2).unwrap();
        let storage = cart.end_session(ClearOnExit::Clear);

        assert!(storage.is_empty());
        let reopened = Cart::open(storage, &CartConfig::default());
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_stale_lines() {
        let now = Utc::now();
        let mut cart = open();
        cart.add_to_cart(p1().captured_at(now - Duration::hours(3)), 1)
            .unwrap();
        cart.add_to_cart(
            ProductSnapshot::new("p2", "Kurta", Money::from_rupees(2500), 1).captured_at(now),
            1,
        )
        .unwrap();

        let stale = cart.stale_lines(now);
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].product.id, ProductId::new("p1"));
    }

    #[test]
    fn test_line_total_uses_discount() {
        let line = CartLine {
            product: p1().with_discount(Money::from_rupees(900)),
            quantity: 2,
        };
        assert_eq!(line.line_total(), Money::from_rupees(1800));
    }
}
