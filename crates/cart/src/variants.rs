//! Variant availability on the product page.
//!
//! Options are grouped by name into dimensions ("Size", "Color"). Stock is
//! tracked per option, not per combination, so availability of a combination
//! is approximated from the stock of each selected option on its own.

use std::collections::{BTreeMap, BTreeSet};

use fanzon_core::{Money, ProductVariantOption, VariantOptionId};
use serde::{Deserialize, Serialize};

/// All options sharing one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDimension {
    /// Dimension name (e.g., "Size").
    pub name: String,
    /// Options in listing order.
    pub options: Vec<ProductVariantOption>,
}

impl VariantDimension {
    /// Look up an option in this dimension.
    #[must_use]
    pub fn option(&self, id: &VariantOptionId) -> Option<&ProductVariantOption> {
        self.options.iter().find(|option| &option.id == id)
    }
}

/// Group options by name. Dimensions keep the order in which their names
/// first appear; options keep their listing order.
#[must_use]
pub fn group_options(options: &[ProductVariantOption]) -> Vec<VariantDimension> {
    let mut dimensions: Vec<VariantDimension> = Vec::new();
    for option in options {
        match dimensions.iter_mut().find(|dim| dim.name == option.name) {
            Some(dim) => dim.options.push(option.clone()),
            None => dimensions.push(VariantDimension {
                name: option.name.clone(),
                options: vec![option.clone()],
            }),
        }
    }
    dimensions
}

/// The option currently picked in each dimension. Dimensions without an
/// entry have nothing picked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSelection(BTreeMap<String, VariantOptionId>);

impl VariantSelection {
    /// Pick `option` in dimension `name`, replacing any earlier pick.
    pub fn select(&mut self, name: impl Into<String>, option: impl Into<VariantOptionId>) {
        self.0.insert(name.into(), option.into());
    }

    /// Builder form of [`Self::select`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, option: impl Into<VariantOptionId>) -> Self {
        self.select(name, option);
        self
    }

    /// Un-pick dimension `name`.
    pub fn deselect(&mut self, name: &str) {
        self.0.remove(name);
    }

    /// The option picked in dimension `name`.
    #[must_use]
    pub fn selected(&self, name: &str) -> Option<&VariantOptionId> {
        self.0.get(name)
    }

    /// Returns `true` if nothing is picked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if every dimension has a pick that names one of its
    /// options.
    #[must_use]
    pub fn is_complete(&self, dimensions: &[VariantDimension]) -> bool {
        dimensions
            .iter()
            .all(|dim| self.selected_in(dim).is_some())
    }

    /// The picked option of `dimension`, ignoring picks that name an option
    /// the dimension does not have.
    #[must_use]
    pub fn selected_in<'a>(&self, dimension: &'a VariantDimension) -> Option<&'a ProductVariantOption> {
        self.selected(&dimension.name)
            .and_then(|id| dimension.option(id))
    }
}

/// A (dimension name, option id) pair the shopper cannot pick.
pub type UnavailableOption = (String, VariantOptionId);

/// Options that cannot be picked given the current selection.
///
/// An option is unavailable when it has no stock itself. When the product
/// has two or more dimensions, an option is also unavailable when the pick
/// in any *other* dimension has no stock.
#[must_use]
pub fn unavailable_options(
    dimensions: &[VariantDimension],
    selection: &VariantSelection,
) -> BTreeSet<UnavailableOption> {
    let cross_check = dimensions.len() >= 2;
    let mut unavailable = BTreeSet::new();

    for (index, dimension) in dimensions.iter().enumerate() {
        let other_pick_sold_out = cross_check
            && dimensions
                .iter()
                .enumerate()
                .filter(|(other, _)| *other != index)
                .filter_map(|(_, other)| selection.selected_in(other))
                .any(|picked| !picked.in_stock());

        for option in &dimension.options {
            if !option.in_stock() || other_pick_sold_out {
                unavailable.insert((dimension.name.clone(), option.id.clone()));
            }
        }
    }

    unavailable
}

/// The picked options, in dimension order.
#[must_use]
pub fn selected_options<'a>(
    dimensions: &'a [VariantDimension],
    selection: &VariantSelection,
) -> Vec<&'a ProductVariantOption> {
    dimensions
        .iter()
        .filter_map(|dim| selection.selected_in(dim))
        .collect()
}

/// Unit price of the product with the picked options' surcharges applied.
#[must_use]
pub fn selection_price(
    base: Money,
    dimensions: &[VariantDimension],
    selection: &VariantSelection,
) -> Money {
    base + selected_options(dimensions, selection)
        .into_iter()
        .map(|option| option.additional_price)
        .sum::<Money>()
}

/// Lowest stock among the picked options, or `None` if nothing is picked.
///
/// This is the ceiling to record on the snapshot when the picked variant is
/// added to the cart.
#[must_use]
pub fn selection_stock(dimensions: &[VariantDimension], selection: &VariantSelection) -> Option<u32> {
    selected_options(dimensions, selection)
        .into_iter()
        .map(|option| option.stock_count)
        .min()
}
