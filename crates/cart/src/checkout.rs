//! Revalidating cart snapshots before checkout.
//!
//! Cart lines carry the product as it looked when it was added. Before an
//! order is placed each line is compared with the product's current data;
//! the backend still enforces stock at order time, this only catches the
//! obvious cases early so the shopper is not surprised.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use fanzon_core::{Money, ProductId, ProductSnapshot};

use crate::cart::CartLine;

/// Where current product data comes from.
pub trait ProductSource {
    /// Current data for `id`, or `None` if the product is no longer listed.
    fn current(&self, id: &ProductId) -> Option<ProductSnapshot>;
}

impl ProductSource for HashMap<ProductId, ProductSnapshot> {
    fn current(&self, id: &ProductId) -> Option<ProductSnapshot> {
        self.get(id).cloned()
    }
}

impl ProductSource for BTreeMap<ProductId, ProductSnapshot> {
    fn current(&self, id: &ProductId) -> Option<ProductSnapshot> {
        self.get(id).cloned()
    }
}

/// A difference between a line's snapshot and current product data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// The product is no longer listed.
    Unavailable,
    /// The product is listed but has no stock.
    OutOfStock,
    /// Less stock than the line's quantity.
    StockReduced { available: u32 },
    /// The unit price moved.
    PriceChanged { previous: Money, current: Money },
}

/// Outcome of checking one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCheck {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    /// Fresh product data, `None` if the product is gone.
    pub current: Option<ProductSnapshot>,
    pub issues: Vec<LineIssue>,
    /// The snapshot was older than the allowed age.
    pub stale: bool,
}

/// Outcome of checking a whole cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Revalidation {
    checks: Vec<LineCheck>,
}

impl Revalidation {
    /// Per-line results in cart order.
    #[must_use]
    pub fn checks(&self) -> &[LineCheck] {
        &self.checks
    }

    /// Returns `true` if no line has an issue.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.checks.iter().all(|check| check.issues.is_empty())
    }

    /// Lines that have at least one issue.
    pub fn problems(&self) -> impl Iterator<Item = &LineCheck> {
        self.checks.iter().filter(|check| !check.issues.is_empty())
    }
}

/// Compare each line against `source`.
pub fn revalidate<P: ProductSource + ?Sized>(
    lines: &[CartLine],
    source: &P,
    max_age: Duration,
    now: DateTime<Utc>,
) -> Revalidation {
    let checks = lines
        .iter()
        .map(|line| check_line(line, source.current(&line.product.id), max_age, now))
        .collect();
    Revalidation { checks }
}

fn check_line(
    line: &CartLine,
    current: Option<ProductSnapshot>,
    max_age: Duration,
    now: DateTime<Utc>,
) -> LineCheck {
    let mut issues = Vec::new();

    match &current {
        None => issues.push(LineIssue::Unavailable),
        Some(product) => {
            if product.stock_count == 0 {
                issues.push(LineIssue::OutOfStock);
            } else if product.stock_count < line.quantity {
                issues.push(LineIssue::StockReduced {
                    available: product.stock_count,
                });
            }

            let previous = line.product.unit_price();
            let fresh = product.unit_price();
            if previous != fresh {
                issues.push(LineIssue::PriceChanged {
                    previous,
                    current: fresh,
                });
            }
        }
    }

    LineCheck {
        product_id: line.product.id.clone(),
        title: line.product.title.clone(),
        quantity: line.quantity,
        current,
        issues,
        stale: line.product.is_stale(max_age, now),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{Cart, CartConfig, CartEvent, MemoryStorage};

    fn snapshot(id: &str, price: i64, stock: u32) -> ProductSnapshot {
        ProductSnapshot::new(id, format!("Product {id}"), Money::from_rupees(price), stock)
    }

    fn catalog(products: &[ProductSnapshot]) -> HashMap<ProductId, ProductSnapshot> {
        products.iter().map(|p| (p.id.clone(), p.clone())).collect()
    }

    fn cart_with(lines: &[(ProductSnapshot, u32)]) -> Cart<MemoryStorage> {
        let mut cart = Cart::open(MemoryStorage::default(), &CartConfig::default());
        for (product, quantity) in lines {
            cart.add_to_cart(product.clone(), *quantity).unwrap();
        }
        cart
    }

    #[test]
    fn test_clean_when_nothing_changed() {
        let cart = cart_with(&[(snapshot("a", 100, 5), 2)]);
        let source = catalog(&[snapshot("a", 100, 5)]);

        let result = cart.revalidate(&source, Utc::now());
        assert!(result.is_clean());
        assert_eq!(result.checks().len(), 1);
    }

    #[test]
    fn test_detects_each_issue() {
        let cart = cart_with(&[
            (snapshot("gone", 100, 5), 1),
            (snapshot("sold", 100, 5), 1),
            (snapshot("low", 100, 5), 4),
            (snapshot("pricey", 100, 5), 1),
        ]);
        let source = catalog(&[
            snapshot("sold", 100, 0),
            snapshot("low", 100, 2),
            snapshot("pricey", 120, 5),
        ]);

        let result = cart.revalidate(&source, Utc::now());
        let issues: Vec<_> = result.checks().iter().map(|c| c.issues.clone()).collect();

        assert_eq!(issues[0], [LineIssue::Unavailable]);
        assert_eq!(issues[1], [LineIssue::OutOfStock]);
        assert_eq!(issues[2], [LineIssue::StockReduced { available: 2 }]);
        assert_eq!(
            issues[3],
            [LineIssue::PriceChanged {
                previous: Money::from_rupees(100),
                current: Money::from_rupees(120),
            }]
        );
        assert_eq!(result.problems().count(), 4);
    }

    #[test]
    fn test_stock_drop_above_quantity_is_fine() {
        let cart = cart_with(&[(snapshot("a", 100, 10), 2)]);
        let source = catalog(&[snapshot("a", 100, 3)]);
        assert!(cart.revalidate(&source, Utc::now()).is_clean());
    }

    #[test]
    fn test_marks_stale_snapshots() {
        let now = Utc::now();
        let cart = cart_with(&[(snapshot("a", 100, 5).captured_at(now - Duration::days(1)), 1)]);
        let source = catalog(&[snapshot("a", 100, 5)]);

        let result = cart.revalidate(&source, now);
        assert!(result.checks()[0].stale);
        assert!(result.is_clean());
    }

    #[test]
    fn test_apply_refreshes_clamps_and_removes() {
        let mut cart = cart_with(&[
            (snapshot("gone", 100, 5), 1),
            (snapshot("sold", 100, 5), 1),
            (snapshot("low", 100, 5), 4),
            (snapshot("pricey", 100, 5), 1),
        ]);
        let source = catalog(&[
            snapshot("sold", 100, 0),
            snapshot("low", 100, 2),
            snapshot("pricey", 120, 5),
        ]);

        let result = cart.revalidate(&source, Utc::now());
        let events = cart.apply_revalidation(&result);

        assert_eq!(events.len(), 4);
        assert!(matches!(&events[0], CartEvent::Removed { product_id, .. } if product_id.as_str() == "gone"));
        assert!(matches!(&events[1], CartEvent::Removed { product_id, .. } if product_id.as_str() == "sold"));
        assert!(matches!(&events[2], CartEvent::QuantityUpdated { quantity: 2, .. }));
        assert_eq!(
            events[3],
            CartEvent::PriceChanged {
                product_id: ProductId::new("pricey"),
                title: "Product pricey".to_owned(),
                previous: Money::from_rupees(100),
                current: Money::from_rupees(120),
            }
        );

        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["low", "pricey"]);
        assert_eq!(cart.subtotal(), Money::from_rupees(2 * 100 + 120));

        // A second pass finds nothing left to fix.
        assert!(cart.revalidate(&source, Utc::now()).is_clean());
    }

    #[test]
    fn test_ordered_map_source() {
        let cart = cart_with(&[(snapshot("a", 100, 5), 3)]);
        let source: BTreeMap<ProductId, ProductSnapshot> = [snapshot("a", 100, 1)]
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let result = cart.revalidate(&source, Utc::now());
        assert_eq!(
            result.checks()[0].issues,
            [LineIssue::StockReduced { available: 1 }]
        );
    }
}
