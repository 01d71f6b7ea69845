//! Write-through persistence of cart lines.
//!
//! The whole line collection is serialized as a JSON array under a single
//! key on every change. There is no version tag: a blob that no longer
//! matches the line schema is discarded and the cart starts empty.

use tracing::{debug, warn};

use crate::cart::CartLine;
use crate::storage::CartStorage;

/// Loads and saves the line collection through a [`CartStorage`] backend.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store that keeps the cart under `key`.
    #[must_use]
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the persisted lines.
    ///
    /// Missing, unreadable or malformed data yields an empty collection.
    #[must_use]
    pub fn load(&self) -> Vec<CartLine> {
        let raw = match self.storage.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<CartLine>>(&raw) {
            Ok(lines) => {
                debug!(key = %self.key, lines = lines.len(), "Loaded stored cart");
                lines
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding malformed stored cart");
                Vec::new()
            }
        }
    }

    /// Persist the full line collection, replacing what was stored.
    ///
    /// Failures are logged and otherwise ignored; the in-memory cart stays
    /// authoritative.
    pub fn save(&mut self, lines: &[CartLine]) {
        let blob = match serde_json::to_string(lines) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to serialize cart");
                return;
            }
        };

        if let Err(e) = self.storage.write(&self.key, &blob) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    /// Delete the persisted cart.
    pub fn discard(&mut self) {
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "Failed to remove stored cart");
        }
    }
}
