//! storecart CLI - Terminal storefront.
//!
//! # Usage
//!
//! ```bash
//! # List the products on the page
//! storecart products
//!
//! # Add two units of product 1, then look at the cart
//! storecart add 1 -q 2
//! storecart show
//!
//! # Take one unit off the first line item, drop the second
//! storecart update 0 -1
//! storecart remove 1
//!
//! # Build the checkout link
//! storecart checkout -a "Av. Pellegrini 1234, Rosario" -p Transferencia
//! ```
//!
//! # Commands
//!
//! - `products` - Render the catalog
//! - `show` - Render the cart and badge
//! - `add`, `remove`, `update`, `clear` - Mutate the cart
//! - `checkout` - Validate the order and print the messaging link
//!
//! Configuration comes from `STORECART_*` environment variables (see
//! `storecart_storefront::config`). Logs go to stderr; set `RUST_LOG` to
//! change the level and `STORECART_LOG_FORMAT=json` for JSON lines.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storecart_core::ProductId;
use storecart_storefront::{StorefrontConfig, StorefrontError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "storecart")]
#[command(author, version, about = "storecart terminal storefront")]
struct Cli {
    /// Catalog file, YAML or JSON (overrides `STORECART_CATALOG`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the products on the page
    Products,
    /// Show the cart contents and total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id as listed by `products`
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove the line item at a cart position
    Remove {
        /// Position as listed by `show`
        index: usize,
    },
    /// Change the quantity of the line item at a cart position
    Update {
        /// Position as listed by `show`
        index: usize,

        /// Units to add (negative to take away)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Empty the cart
    Clear,
    /// Validate the order and print the checkout link
    Checkout {
        /// Shipping address
        #[arg(short, long, default_value = "")]
        address: String,

        /// Payment method
        #[arg(short, long)]
        payment: Option<String>,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "storecart_cli=info,storecart_storefront=info".into());

    // JSON lines for log collectors when STORECART_LOG_FORMAT=json, text otherwise
    let json = std::env::var("STORECART_LOG_FORMAT").is_ok_and(|format| format == "json");
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if e.is_user_facing() {
            commands::notify(&e.to_string());
        } else {
            tracing::error!("Command failed: {e}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), StorefrontError> {
    let config = StorefrontConfig::from_env()?;
    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path.clone());

    match cli.command {
        Commands::Products => commands::products::list(&config, &catalog_path)?,
        Commands::Show => commands::cart::show(&config),
        Commands::Add { id, quantity } => commands::cart::add(&config, &catalog_path, id, quantity)?,
        Commands::Remove { index } => commands::cart::remove(&config, index)?,
        Commands::Update { index, delta } => commands::cart::update(&config, index, delta)?,
        Commands::Clear => commands::cart::clear(&config),
        Commands::Checkout { address, payment } => {
            commands::checkout::checkout(&config, address, payment)?;
        }
    }
    Ok(())
}
