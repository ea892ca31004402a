//! Digital Shop CLI - Browse the catalog and manage the cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse in-stock themes, cheapest first
//! shop-cli catalog list -c Themes --availability in_stock --sort price_asc
//!
//! # Compare up to four items side by side
//! shop-cli catalog compare item_1 item_2
//!
//! # Add an item to the cart and check out
//! shop-cli cart add item_1
//! shop-cli cart checkout
//! ```
//!
//! # Commands
//!
//! - `catalog` - List, compare and explore shop items
//! - `cart` - Show and edit the persisted cart, then check out
//!
//! Items come from `--catalog <file>`, `SHOP_CATALOG_PATH`, or the shop API.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use digital_shop_storefront::config::ShopConfig;
use digital_shop_storefront::error::{AppError, Result};

mod commands;

use commands::catalog::ListArgs;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Digital shop command line")]
struct Cli {
    /// Read items from this JSON file instead of the shop API
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse shop items
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List items matching a search, category and filters
    List(ListArgs),
    /// Compare items side by side (at most four)
    Compare {
        /// Item ids in display order
        #[arg(required = true)]
        item_ids: Vec<String>,
    },
    /// Show items from the same category
    Related {
        /// Item id
        item_id: String,
    },
    /// List the categories present in the catalog
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart contents and totals
    Show,
    /// Add one unit of an item
    Add {
        /// Item id
        item_id: String,
    },
    /// Remove an item
    Remove {
        /// Item id
        item_id: String,
    },
    /// Set the quantity of an item (0 removes it)
    Set {
        /// Item id
        item_id: String,
        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
    /// Submit the cart to the shop API
    Checkout,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Errors and warnings become Sentry events, info and debug become breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    let cli = Cli::parse();

    let config = ShopConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "digital_shop_cli=info,digital_shop_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(AppError::from(e)),
    };

    if let Err(e) = result {
        e.report();
        eprintln!("Error: {}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ShopConfig) -> Result<()> {
    let catalog_file = cli.catalog.as_deref();
    match cli.command {
        Commands::Catalog { action } => {
            let items = commands::catalog::fetch_items(config, catalog_file).await?;
            match action {
                CatalogAction::List(args) => commands::catalog::list(&items, args)?,
                CatalogAction::Compare { item_ids } => {
                    commands::catalog::compare(&items, &item_ids)?;
                }
                CatalogAction::Related { item_id } => {
                    commands::catalog::related(&items, &item_id)?;
                }
                CatalogAction::Categories => commands::catalog::categories(&items),
            }
        }
        Commands::Cart { action } => {
            let mut store = commands::cart::open_store(config);
            match action {
                CartAction::Show => commands::cart::show(&store),
                CartAction::Add { item_id } => {
                    let items = commands::catalog::fetch_items(config, catalog_file).await?;
                    commands::cart::add(&mut store, &items, &item_id)?;
                }
                CartAction::Remove { item_id } => commands::cart::remove(&mut store, &item_id)?,
                CartAction::Set { item_id, quantity } => {
                    commands::cart::set_quantity(&mut store, &item_id, quantity)?;
                }
                CartAction::Clear => commands::cart::clear(&mut store),
                CartAction::Checkout => commands::cart::checkout(&mut store, config).await?,
            }
        }
    }
    Ok(())
}
