//! Cart pricing.
//!
//! Everything here is derived from the line items on demand. Carts hold tens
//! of lines at most, so nothing is cached.

use fanzon_core::Money;
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;

/// Sum of unit price times quantity.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> Money {
    lines.iter().map(CartLine::line_total).sum()
}

/// `flat_fee` for a non-empty cart, zero otherwise.
///
/// Shipping is a single flat rate per order; weight, destination and the
/// number of sellers involved do not affect it.
#[must_use]
pub fn shipping_fee(lines: &[CartLine], flat_fee: Money) -> Money {
    if lines.is_empty() { Money::ZERO } else { flat_fee }
}

/// Subtotal plus shipping fee.
#[must_use]
pub fn total(lines: &[CartLine], flat_fee: Money) -> Money {
    subtotal(lines) + shipping_fee(lines, flat_fee)
}

/// Total units across all lines (what the cart badge shows).
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u32 {
    lines
        .iter()
        .fold(0_u32, |count, line| count.saturating_add(line.quantity))
}

/// Pricing figures for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: u32,
    pub subtotal: Money,
    pub shipping_fee: Money,
    pub total: Money,
}

impl CartSummary {
    /// Compute the summary for `lines`.
    #[must_use]
    pub fn of(lines: &[CartLine], flat_fee: Money) -> Self {
        let subtotal = subtotal(lines);
        let shipping_fee = shipping_fee(lines, flat_fee);
        Self {
            item_count: item_count(lines),
            subtotal,
            shipping_fee,
            total: subtotal + shipping_fee,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fanzon_core::ProductSnapshot;

    use super::*;

    const FEE: i64 = 150;

    fn line(price: i64, discount: Option<i64>, quantity: u32) -> CartLine {
        let mut product = ProductSnapshot::new("p", "P", Money::from_rupees(price), 100);
        product.discount_price = discount.map(Money::from_rupees);
        CartLine { product, quantity }
    }

    #[test]
    fn test_empty_cart() {
        let summary = CartSummary::of(&[], Money::from_rupees(FEE));
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.subtotal, Money::ZERO);
        assert_eq!(summary.shipping_fee, Money::ZERO);
        assert_eq!(summary.total, Money::ZERO);
    }

    #[test]
    fn test_subtotal_mixes_discounted_and_full_price() {
        let lines = [line(1000, None, 2), line(500, Some(400), 3)];
        assert_eq!(subtotal(&lines), Money::from_rupees(2000 + 1200));
    }

    #[test]
    fn test_shipping_charged_once() {
        let lines = [line(100, None, 1), line(200, None, 1), line(300, None, 1)];
        assert_eq!(
            shipping_fee(&lines, Money::from_rupees(FEE)),
            Money::from_rupees(FEE)
        );
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let lines = [line(100, None, 2), line(200, None, 5)];
        assert_eq!(item_count(&lines), 7);
    }

    #[test]
    fn test_total_is_subtotal_plus_shipping() {
        let cases: [&[CartLine]; 3] = [
            &[],
            &[line(1000, None, 3)],
            &[line(1000, Some(750), 1), line(40, None, 9)],
        ];
        for lines in cases {
            let fee = Money::from_rupees(FEE);
            assert_eq!(
                total(lines, fee),
                subtotal(lines) + shipping_fee(lines, fee)
            );
            assert_eq!(shipping_fee(lines, fee).is_zero(), lines.is_empty());
        }
    }
}
