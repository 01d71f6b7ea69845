//! Cart error types.

use fanzon_core::ProductId;
use thiserror::Error;

/// Reasons a cart mutation is refused.
///
/// A refused mutation never changes the cart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The requested quantity exceeds the snapshot's stock ceiling.
    #[error("insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product the request was for.
        product_id: ProductId,
        /// Total quantity the line would have ended up with.
        requested: u32,
        /// Stock ceiling recorded on the snapshot.
        available: u32,
    },

    /// A line cannot be added with a quantity of zero.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
}

impl CartError {
    /// Stable machine-readable code for the failure.
    #[must_use]
    pub const fn reason_code(&self) -> &'static str {
        match self {
            Self::InsufficientStock { .. } => "insufficient_stock",
            Self::InvalidQuantity => "invalid_quantity",
        }
    }
}

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto the backend.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_codes() {
        let err = CartError::InsufficientStock {
            product_id: ProductId::new("p1"),
            requested: 7,
            available: 5,
        };
        assert_eq!(err.reason_code(), "insufficient_stock");
        assert_eq!(CartError::InvalidQuantity.reason_code(), "invalid_quantity");
    }

    #[test]
    fn test_insufficient_stock_message() {
        let err = CartError::InsufficientStock {
            product_id: ProductId::new("p1"),
            requested: 7,
            available: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for p1: requested 7, available 5"
        );
    }
}
