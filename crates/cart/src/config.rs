//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `FANZON_SHIPPING_FEE` - Flat shipping fee in PKR (default: 150)
//! - `FANZON_CART_KEY` - Storage key for the cart blob (default: fanzon-cart)
//! - `FANZON_DATA_DIR` - Directory backing file storage (default: .fanzon)
//! - `FANZON_SNAPSHOT_MAX_AGE_MINUTES` - Age after which a product snapshot
//!   should be revalidated (default: 60)

use std::path::PathBuf;

use chrono::Duration;
use fanzon_core::Money;
use thiserror::Error;

/// Flat shipping fee in rupees when `FANZON_SHIPPING_FEE` is unset.
pub const DEFAULT_SHIPPING_FEE_RUPEES: i64 = 150;
/// Storage key when `FANZON_CART_KEY` is unset.
pub const DEFAULT_CART_KEY: &str = "fanzon-cart";
const DEFAULT_DATA_DIR: &str = ".fanzon";
const DEFAULT_SNAPSHOT_MAX_AGE_MINUTES: i64 = 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Flat fee charged once for a non-empty cart
    pub shipping_fee: Money,
    /// Key the serialized cart is stored under
    pub storage_key: String,
    /// Directory for file-backed storage
    pub data_dir: PathBuf,
    /// Snapshots older than this are due for revalidation
    pub snapshot_max_age: Duration,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            shipping_fee: Money::from_rupees(DEFAULT_SHIPPING_FEE_RUPEES),
            storage_key: DEFAULT_CART_KEY.to_owned(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            snapshot_max_age: Duration::minutes(DEFAULT_SNAPSHOT_MAX_AGE_MINUTES),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a present value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let shipping_fee = match lookup("FANZON_SHIPPING_FEE") {
            Some(raw) => parse_fee(&raw)?,
            None => defaults.shipping_fee,
        };
        let storage_key = lookup("FANZON_CART_KEY")
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(defaults.storage_key);
        let data_dir = lookup("FANZON_DATA_DIR").map_or(defaults.data_dir, PathBuf::from);
        let snapshot_max_age = match lookup("FANZON_SNAPSHOT_MAX_AGE_MINUTES") {
            Some(raw) => parse_minutes("FANZON_SNAPSHOT_MAX_AGE_MINUTES", &raw)?,
            None => defaults.snapshot_max_age,
        };

        Ok(Self {
            shipping_fee,
            storage_key,
            data_dir,
            snapshot_max_age,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_fee(raw: &str) -> Result<Money, ConfigError> {
    let fee = raw.parse::<Money>().map_err(|e| {
        ConfigError::InvalidEnvVar("FANZON_SHIPPING_FEE".to_string(), e.to_string())
    })?;
    if fee.is_negative() {
        return Err(ConfigError::InvalidEnvVar(
            "FANZON_SHIPPING_FEE".to_string(),
            "must not be negative".to_string(),
        ));
    }
    Ok(fee)
}

fn parse_minutes(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let minutes = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(Duration::minutes(i64::from(minutes)))
}
