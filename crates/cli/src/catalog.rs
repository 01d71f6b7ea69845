//! YAML product catalog.
//!
//! Stands in for the hosted product tables: a list of products with their
//! prices, stock and variant options.
//!
//! ```yaml
//! - id: p1
//!   title: Lawn Suit
//!   price: 1000
//!   discount_price: 900
//!   stock_count: 5
//!   seller_id: s1
//!   variants:
//!     - { id: s, name: Size, value: Small, stock_count: 3 }
//!     - { id: red, name: Color, value: Red, stock_count: 0, additional_price: 100 }
//! ```

use std::path::Path;

use chrono::{DateTime, Utc};
use fanzon_cart::ProductSource;
use fanzon_core::{Money, ProductId, ProductSnapshot, ProductVariantOption, SellerId};
use serde::Deserialize;

use crate::error::CliError;

/// One product as listed in the catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    #[serde(default)]
    pub discount_price: Option<Money>,
    pub stock_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub seller_id: Option<SellerId>,
    #[serde(default)]
    pub variants: Vec<ProductVariantOption>,
}

impl CatalogProduct {
    /// Copy the cart-relevant fields into a snapshot taken at `at`.
    #[must_use]
    pub fn snapshot(&self, at: DateTime<Utc>) -> ProductSnapshot {
        ProductSnapshot {
            id: self.id.clone(),
            title: self.title.clone(),
            price: self.price,
            discount_price: self.discount_price,
            stock_count: self.stock_count,
            images: self.images.clone(),
            seller_id: self.seller_id.clone(),
            captured_at: at,
        }
    }
}

/// All products in the catalog file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    /// Read and parse the catalog at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content).map_err(|source| CliError::CatalogParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a catalog from YAML text.
    ///
    /// # Errors
    ///
    /// Returns the parser error if `content` is not a list of products.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let products = serde_yaml::from_str(content)?;
        Ok(Self { products })
    }

    /// Look up a product.
    ///
    /// # Errors
    ///
    /// Returns `CliError::UnknownProduct` if no product has this ID.
    pub fn product(&self, id: &str) -> Result<&CatalogProduct, CliError> {
        self.products
            .iter()
            .find(|p| p.id.as_str() == id)
            .ok_or_else(|| CliError::UnknownProduct(id.to_owned()))
    }
}

impl ProductSource for Catalog {
    fn current(&self, id: &ProductId) -> Option<ProductSnapshot> {
        self.products
            .iter()
            .find(|p| &p.id == id)
            .map(|p| p.snapshot(Utc::now()))
    }
}
