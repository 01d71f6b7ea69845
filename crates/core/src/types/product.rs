//! Product snapshots.
//!
//! A snapshot is an owned copy of the product fields the cart needs, taken at
//! the moment the product is added. Later changes on the backend are not
//! reflected until the snapshot is refreshed (see checkout revalidation in
//! `fanzon-cart`).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Money, ProductId, SellerId};

/// A point-in-time copy of a product listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Listed unit price.
    pub price: Money,
    /// Discounted unit price, if the seller is running a discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Money>,
    /// Units in stock when the snapshot was taken.
    pub stock_count: u32,
    /// Image URLs, primary image first.
    #[serde(default)]
    pub images: Vec<String>,
    /// Seller that owns the listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<SellerId>,
    /// When the snapshot was taken.
    pub captured_at: DateTime<Utc>,
}

impl ProductSnapshot {
    /// Create a snapshot captured now, with no discount, images or seller.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Money, stock_count: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            discount_price: None,
            stock_count,
            images: Vec::new(),
            seller_id: None,
            captured_at: Utc::now(),
        }
    }

    /// Set the discounted price.
    #[must_use]
    pub fn with_discount(mut self, discount_price: Money) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    /// Set the owning seller.
    #[must_use]
    pub fn with_seller(mut self, seller_id: impl Into<SellerId>) -> Self {
        self.seller_id = Some(seller_id.into());
        self
    }

    /// Set the capture timestamp.
    #[must_use]
    pub fn captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = at;
        self
    }

    /// The price charged per unit.
    ///
    /// The discounted price wins whenever one is present. Whether it is
    /// actually lower than the listed price is the seller dashboard's concern.
    #[must_use]
    pub fn unit_price(&self) -> Money {
        self.discount_price.unwrap_or(self.price)
    }

    /// Returns `true` if at least one unit was in stock at capture time.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock_count > 0
    }

    /// The primary image, if any.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Returns `true` if the snapshot is older than `max_age` at `now`.
    #[must_use]
    pub fn is_stale(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.captured_at) > max_age
    }
}
