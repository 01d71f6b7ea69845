//! Core types for FANZON.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod product;
pub mod variant;

pub use id::*;
pub use money::Money;
pub use product::ProductSnapshot;
pub use variant::ProductVariantOption;
