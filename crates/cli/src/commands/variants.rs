//! Variant availability command.

use std::path::Path;

use fanzon_cart::variants::{self, VariantSelection};
use tracing::info;

use crate::catalog::Catalog;
use crate::error::CliError;

/// Parse `Name=OptionId` picks into a selection.
fn parse_selection(raw: &[String]) -> Result<VariantSelection, CliError> {
    let mut selection = VariantSelection::default();
    for pick in raw {
        let (name, option) = pick
            .split_once('=')
            .filter(|(name, option)| !name.is_empty() && !option.is_empty())
            .ok_or_else(|| CliError::InvalidSelection(pick.clone()))?;
        selection.select(name, option);
    }
    Ok(selection)
}

/// Print every dimension with availability and the resulting price.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the product is unknown
/// or a pick is malformed.
pub fn show(catalog_path: &Path, product_id: &str, raw_selection: &[String]) -> Result<(), CliError> {
    let catalog = Catalog::load(catalog_path)?;
    let product = catalog.product(product_id)?;
    let selection = parse_selection(raw_selection)?;

    let dimensions = variants::group_options(&product.variants);
    if dimensions.is_empty() {
        info!("{} has no variants", product.title);
        return Ok(());
    }

    let unavailable = variants::unavailable_options(&dimensions, &selection);

    for dimension in &dimensions {
        info!("{}:", dimension.name);
        for option in &dimension.options {
            let picked = selection.selected(&dimension.name) == Some(&option.id);
            let blocked = unavailable.contains(&(dimension.name.clone(), option.id.clone()));
            info!(
                "  [{}] {} ({}){}{}",
                option.id,
                option.value,
                option.stock_count,
                if picked { " *" } else { "" },
                if blocked { " unavailable" } else { "" },
            );
        }
    }

    let base = product.discount_price.unwrap_or(product.price);
    info!(
        "Price: {}",
        variants::selection_price(base, &dimensions, &selection)
    );
    if let Some(stock) = variants::selection_stock(&dimensions, &selection) {
        info!("In stock for this selection: {stock}");
    }
    if !selection.is_complete(&dimensions) {
        info!("Pick one option in every dimension to add this product");
    }
    Ok(())
}
