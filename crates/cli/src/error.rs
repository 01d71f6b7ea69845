//! CLI error type.

use std::path::PathBuf;

use fanzon_cart::{CartError, ConfigError};
use thiserror::Error;

/// Errors that end a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog file is not valid YAML for a product list.
    #[error("Invalid catalog {path}: {source}")]
    CatalogParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// The product is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// A `--select` argument is not `Name=OptionId`.
    #[error("Invalid selection {0:?}, expected Name=OptionId")]
    InvalidSelection(String),

    /// The cart refused the change.
    #[error("Cart rejected the change: {0}")]
    Cart(#[from] CartError),
}
