//! Shopper-facing messages for cart mutations.
//!
//! The cart itself only returns results. Whatever displays toasts (the web
//! UI, the CLI) maps results to [`Notification`]s here and hands them to its
//! own [`NotificationSink`].

use serde::{Deserialize, Serialize};

use crate::cart::CartEvent;
use crate::error::CartError;

/// Whether a notification reports success or failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A title/description pair to show the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    fn success(title: &str, description: String) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.to_owned(),
            description,
        }
    }

    fn error(title: &str, description: String) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.to_owned(),
            description,
        }
    }
}

/// Something that displays notifications.
pub trait NotificationSink {
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Message for a successful mutation. `Unchanged` has none.
#[must_use]
pub fn for_event(event: &CartEvent) -> Option<Notification> {
    let notification = match event {
        CartEvent::Added { title, .. } => Notification::success(
            "Added to cart",
            format!("{title} has been added to your cart"),
        ),
        CartEvent::QuantityIncreased {
            title, quantity, ..
        } => Notification::success(
            "Added to cart",
            format!("{title} quantity updated to {quantity}"),
        ),
        CartEvent::QuantityUpdated {
            title, quantity, ..
        } => Notification::success(
            "Cart updated",
            format!("{title} quantity updated to {quantity}"),
        ),
        CartEvent::PriceChanged {
            title,
            previous,
            current,
            ..
        } => Notification::success(
            "Price updated",
            format!("{title} is now {current} (was {previous})"),
        ),
        CartEvent::Removed { title, .. } => Notification::success(
            "Removed from cart",
            format!("{title} has been removed from your cart"),
        ),
        CartEvent::Cleared { .. } => Notification::success(
            "Cart cleared",
            "All items have been removed from your cart".to_owned(),
        ),
        CartEvent::Unchanged => return None,
    };
    Some(notification)
}

/// Message for a refused mutation.
#[must_use]
pub fn for_error(error: &CartError) -> Notification {
    match error {
        CartError::InsufficientStock { available, .. } => Notification::error(
            "Insufficient stock",
            format!("Only {available} items available in stock"),
        ),
        CartError::InvalidQuantity => Notification::error(
            "Invalid quantity",
            "Quantity must be at least 1".to_owned(),
        ),
    }
}

/// Message for either arm of a mutation result.
#[must_use]
pub fn notification_for(result: &Result<CartEvent, CartError>) -> Option<Notification> {
    match result {
        Ok(event) => for_event(event),
        Err(error) => Some(for_error(error)),
    }
}

/// Map `result` to a message and send it to `sink`, passing the result on.
pub fn report<S: NotificationSink + ?Sized>(
    sink: &mut S,
    result: Result<CartEvent, CartError>,
) -> Result<CartEvent, CartError> {
    if let Some(notification) = notification_for(&result) {
        sink.notify(notification);
    }
    result
}
