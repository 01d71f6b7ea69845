//! Product page selection through to checkout revalidation.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use chrono::{Duration, Utc};
use fanzon_cart::checkout::LineIssue;
use fanzon_cart::notify;
use fanzon_cart::variants::{self, VariantSelection};
use fanzon_cart::{Cart, CartConfig, CartEvent, MemoryStorage};
use fanzon_core::{Money, ProductId, ProductSnapshot, VariantOptionId};
use fanzon_integration_tests::{embroidered_kurta, lawn_suit, shirt_options};

fn pair(name: &str, id: &str) -> (String, VariantOptionId) {
    (name.to_owned(), VariantOptionId::new(id))
}

#[test]
fn test_picking_sold_out_color_blocks_every_size() {
    let dims = variants::group_options(&shirt_options());
    let selection = VariantSelection::default().with("Color", "black");

    let unavailable = variants::unavailable_options(&dims, &selection);
    for size in ["s", "m", "xl"] {
        assert!(unavailable.contains(&pair("Size", size)));
    }
    assert!(!unavailable.contains(&pair("Color", "white")));
    assert!(!unavailable.contains(&pair("Color", "navy")));
}

#[test]
fn test_selected_variant_goes_into_cart_with_its_price_and_ceiling() {
    let dims = variants::group_options(&shirt_options());
    let selection = VariantSelection::default()
        .with("Size", "m")
        .with("Color", "navy");
    assert!(selection.is_complete(&dims));
    assert_eq!(variants::unavailable_options(&dims, &selection).len(), 2);

    let base = Money::from_rupees(1500);
    let price = variants::selection_price(base, &dims, &selection);
    let ceiling = variants::selection_stock(&dims, &selection).unwrap();
    assert_eq!(price, Money::from_rupees(1600));
    assert_eq!(ceiling, 2);

    let snapshot = ProductSnapshot::new("shirt-m-navy", "Oxford Shirt (M, Navy)", price, ceiling);
    let mut cart = Cart::open(MemoryStorage::default(), &CartConfig::default());
    assert!(cart.add_to_cart(snapshot.clone(), 3).is_err());
    cart.add_to_cart(snapshot, 2).unwrap();
    assert_eq!(cart.subtotal(), Money::from_rupees(3200));
}

#[test]
fn test_checkout_revalidation_flow() {
    let now = Utc::now();
    let mut cart = Cart::open(MemoryStorage::default(), &CartConfig::default());
    cart.add_to_cart(lawn_suit().captured_at(now - Duration::hours(2)), 4)
        .unwrap();
    cart.add_to_cart(embroidered_kurta(), 2).unwrap();

    assert_eq!(cart.stale_lines(now).len(), 1);

    // Since the snapshots were taken, the suit sold down to two units and
    // the kurta's discount ended.
    let mut suit = lawn_suit();
    suit.stock_count = 2;
    let mut kurta = embroidered_kurta();
    kurta.discount_price = None;
    let source: HashMap<ProductId, ProductSnapshot> = [suit, kurta]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect();

    let result = cart.revalidate(&source, now);
    assert!(!result.is_clean());
    assert!(result.checks()[0].stale);
    assert_eq!(
        result.checks()[0].issues,
        [LineIssue::StockReduced { available: 2 }]
    );
    assert_eq!(
        result.checks()[1].issues,
        [LineIssue::PriceChanged {
            previous: Money::from_rupees(2000),
            current: Money::from_rupees(2500),
        }]
    );

    let events = cart.apply_revalidation(&result);
    assert!(matches!(
        events.as_slice(),
        [
            CartEvent::QuantityUpdated { quantity: 2, .. },
            CartEvent::PriceChanged { .. },
        ]
    ));
    let toasts: Vec<_> = events.iter().filter_map(notify::for_event).collect();
    assert_eq!(
        toasts[1].description,
        "Embroidered Kurta is now Rs. 2500 (was Rs. 2000)"
    );
    assert_eq!(cart.subtotal(), Money::from_rupees(2 * 1000 + 2 * 2500));
    assert!(cart.stale_lines(now).is_empty());
    assert!(cart.revalidate(&source, now).is_clean());
}
