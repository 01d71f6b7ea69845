//! FANZON CLI - drive the shopping cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with totals
//! fanzon cart show
//!
//! # Add three units of a catalog product
//! fanzon cart add p1 -q 3
//!
//! # Change or drop a line
//! fanzon cart update p1 2
//! fanzon cart remove p1
//!
//! # Check the cart against the catalog before ordering
//! fanzon cart checkout
//!
//! # Show which variant options can still be picked
//! fanzon variants p1 --select Size=m
//! ```
//!
//! # Commands
//!
//! - `cart` - Inspect and change the persisted cart
//! - `variants` - Variant availability for a catalog product
//!
//! Product data comes from a YAML catalog (`--catalog`, default
//! `catalog.yaml`). The cart is stored under `FANZON_DATA_DIR`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod catalog;
mod commands;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "fanzon")]
#[command(author, version, about = "FANZON cart tools")]
struct Cli {
    /// Path to the YAML product catalog
    #[arg(long, global = true, default_value = "catalog.yaml")]
    catalog: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Show variant availability for a product
    Variants {
        /// Catalog product ID
        product_id: String,

        /// Picked option, as `Name=OptionId` (repeatable)
        #[arg(short, long = "select")]
        selections: Vec<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print lines and totals
    Show,
    /// Add a catalog product to the cart
    Add {
        /// Catalog product ID
        product_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line (0 removes it)
    Update {
        /// Product ID of the line
        product_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product ID of the line
        product_id: String,
    },
    /// Remove every line
    Clear,
    /// Revalidate lines against the catalog and fix them up
    Checkout,
}

/// Initialize Sentry error tracking if `SENTRY_DSN` is set.
fn init_sentry() -> Option<sentry::ClientInitGuard> {
    let dsn = std::env::var("SENTRY_DSN").ok()?;

    let guard = sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: std::env::var("SENTRY_ENVIRONMENT")
                .ok()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn main() {
    // Load .env before reading SENTRY_DSN
    let _ = dotenvy::dotenv();
    let _sentry_guard = init_sentry();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fanzon_cart=info,fanzon=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(),
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&cli.catalog, &product_id, quantity),
            CartAction::Update {
                product_id,
                quantity,
            } => commands::cart::update(&product_id, quantity),
            CartAction::Remove { product_id } => commands::cart::remove(&product_id),
            CartAction::Clear => commands::cart::clear(),
            CartAction::Checkout => commands::cart::checkout(&cli.catalog),
        },
        Commands::Variants {
            product_id,
            selections,
        } => commands::variants::show(&cli.catalog, &product_id, &selections),
    }
}
