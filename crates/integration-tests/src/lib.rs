//! Integration tests for the FANZON cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fanzon-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Mutation and pricing behaviour end to end
//! - `persistence` - File-backed carts across sessions
//! - `variant_checkout` - Product page selection through to checkout
//!
//! This library holds the fixtures the test files share. File-backed tests
//! get their data directory from `tempfile::tempdir()`.

use fanzon_core::{Money, ProductSnapshot, ProductVariantOption};

/// Five units at Rs. 1000, no discount.
#[must_use]
pub fn lawn_suit() -> ProductSnapshot {
    ProductSnapshot::new("p1", "Lawn Suit", Money::from_rupees(1000), 5).with_seller("seller-1")
}

/// Two units at Rs. 2500, discounted to Rs. 2000.
#[must_use]
pub fn embroidered_kurta() -> ProductSnapshot {
    ProductSnapshot::new("p2", "Embroidered Kurta", Money::from_rupees(2500), 2)
        .with_discount(Money::from_rupees(2000))
        .with_seller("seller-2")
}

/// Size and color options for a shirt, with one sold-out option per
/// dimension.
#[must_use]
pub fn shirt_options() -> Vec<ProductVariantOption> {
    vec![
        ProductVariantOption::new("s", "Size", "Small", 4),
        ProductVariantOption::new("m", "Size", "Medium", 2),
        ProductVariantOption::new("xl", "Size", "XL", 0)
            .with_additional_price(Money::from_rupees(200)),
        ProductVariantOption::new("white", "Color", "White", 6),
        ProductVariantOption::new("black", "Color", "Black", 0),
        ProductVariantOption::new("navy", "Color", "Navy", 3)
            .with_additional_price(Money::from_rupees(100)),
    ]
}
