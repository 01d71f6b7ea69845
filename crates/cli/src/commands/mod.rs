//! CLI commands.

pub mod cart;
pub mod variants;

use fanzon_cart::{Cart, CartConfig, FileStorage, Notification, NotificationKind, NotificationSink};

use crate::error::CliError;

/// Prints notifications through the log output.
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!("{}: {}", notification.title, notification.description);
            }
            NotificationKind::Error => {
                tracing::warn!("{}: {}", notification.title, notification.description);
            }
        }
    }
}

/// Open the persisted cart described by the environment.
fn open_cart() -> Result<Cart<FileStorage>, CliError> {
    let config = CartConfig::from_env()?;
    let storage = FileStorage::new(&config.data_dir);
    Ok(Cart::open(storage, &config))
}
