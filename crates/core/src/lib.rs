//! FANZON Core - Shared domain types.
//!
//! This crate provides the types used across all FANZON components:
//! - `cart` - Shopping cart, pricing and variant availability
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clients for the hosted backend. Product data arrives from the backend as
//! plain values and is copied into these types.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money, product snapshots and variant options

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
