//! FANZON Cart - shopping cart, pricing and variant availability.
//!
//! This crate holds the storefront logic that runs next to the shopper rather
//! than in the hosted backend:
//!
//! - [`cart`] - Owned cart session with stock-aware mutations
//! - [`store`] / [`storage`] - Write-through persistence of the line items
//! - [`pricing`] - Subtotal, flat shipping fee, total and item count
//! - [`variants`] - Which variant options can still be picked
//! - [`notify`] - Turning mutation results into shopper-facing messages
//! - [`checkout`] - Revalidating snapshots against current product data
//! - [`config`] - Environment-driven settings
//!
//! # Example
//!
//! ```
//! use fanzon_cart::{Cart, CartConfig, MemoryStorage};
//! use fanzon_core::{Money, ProductSnapshot};
//!
//! let mut cart = Cart::open(MemoryStorage::default(), &CartConfig::default());
//! let suit = ProductSnapshot::new("p1", "Lawn Suit", Money::from_rupees(1000), 5);
//!
//! cart.add_to_cart(suit, 3).unwrap();
//! assert_eq!(cart.subtotal(), Money::from_rupees(3000));
//! assert_eq!(cart.total(), Money::from_rupees(3150));
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod notify;
pub mod pricing;
pub mod storage;
pub mod store;
pub mod variants;

pub use cart::{Cart, CartEvent, CartLine, ClearOnExit};
pub use checkout::{LineCheck, LineIssue, ProductSource, Revalidation};
pub use config::{CartConfig, ConfigError};
pub use error::{CartError, StorageError};
pub use notify::{Notification, NotificationKind, NotificationSink};
pub use pricing::CartSummary;
pub use storage::{CartStorage, FileStorage, MemoryStorage};
pub use store::CartStore;
pub use variants::{VariantDimension, VariantSelection};
