//! Product variant options.

use serde::{Deserialize, Serialize};

use super::{Money, VariantOptionId};

/// One selectable value on one axis of product variation.
///
/// Options sharing a `name` (e.g. "Color") form a dimension; `value` is what
/// the shopper picks (e.g. "Red").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariantOption {
    /// Option ID.
    pub id: VariantOptionId,
    /// Dimension name (e.g., "Size", "Color").
    pub name: String,
    /// Option value (e.g., "Large", "Red").
    pub value: String,
    /// Amount added to the product's unit price when selected.
    #[serde(default)]
    pub additional_price: Money,
    /// Units in stock for this option alone.
    pub stock_count: u32,
}

impl ProductVariantOption {
    /// Create an option with no additional price.
    #[must_use]
    pub fn new(
        id: impl Into<VariantOptionId>,
        name: impl Into<String>,
        value: impl Into<String>,
        stock_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.into(),
            additional_price: Money::ZERO,
            stock_count,
        }
    }

    /// Set the additional price.
    #[must_use]
    pub fn with_additional_price(mut self, additional_price: Money) -> Self {
        self.additional_price = additional_price;
        self
    }

    /// Returns `true` if the option has at least one unit in stock.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_count > 0
    }
}
