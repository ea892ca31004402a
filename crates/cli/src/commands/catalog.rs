//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! shop-cli catalog list --search potion --min-price 50 --max-price 200
//! shop-cli catalog compare item_1 item_4
//! shop-cli catalog related item_1
//! shop-cli catalog categories
//! ```

use std::path::Path;

use clap::Args;
use rust_decimal::Decimal;

use digital_shop_core::{Item, Price};
use digital_shop_storefront::catalog::{
    self, Availability, CatalogQuery, ComparisonSet, DEFAULT_RELATED_ITEMS, FilterState,
    MAX_COMPARISON_ITEMS, PriceRange, SortKey, derive_max_price, find_item, related_items,
    toggle_comparison,
};
use digital_shop_storefront::config::ShopConfig;
use digital_shop_storefront::error::{AppError, Result};
use digital_shop_storefront::shop::ShopApiClient;

/// Listing options.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Case-insensitive text matched against names and descriptions
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Lowest price to show
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Highest price to show
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// `all`, `in_stock` or `out_of_stock`
    #[arg(long, default_value_t = Availability::All)]
    pub availability: Availability,

    /// `name_asc`, `name_desc`, `price_asc`, `price_desc`, `newest` or `popular`
    #[arg(long, default_value_t = SortKey::Newest)]
    pub sort: SortKey,
}

impl ListArgs {
    /// Turn the flags into a catalog query.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` if a price bound is negative.
    pub fn into_query(self) -> Result<CatalogQuery> {
        let min = self.min_price.map(to_price).transpose()?;
        let max = self.max_price.map(to_price).transpose()?;
        let price_range = match (min, max) {
            (Some(min), Some(max)) => PriceRange::between(min, max),
            (min, max) => PriceRange { min, max },
        };

        Ok(CatalogQuery {
            search: self.search,
            category: self.category,
            filters: FilterState {
                price_range,
                availability: self.availability,
            },
            sort: self.sort,
        })
    }
}

fn to_price(amount: Decimal) -> Result<Price> {
    Price::new(amount).map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Load items from `file`, the configured catalog file, or the shop API.
///
/// # Errors
///
/// Returns an error if the file or the API cannot be read.
pub async fn fetch_items(config: &ShopConfig, file: Option<&Path>) -> Result<Vec<Item>> {
    match file.or(config.catalog_path.as_deref()) {
        Some(path) => Ok(catalog::load_items(path)?),
        None => {
            let client = ShopApiClient::new(&config.api)?;
            tracing::debug!(base_url = %client.base_url(), "Fetching items from shop API");
            Ok(client.list_items().await?)
        }
    }
}

/// Look up an item or fail with `NotFound`.
pub fn require_item<'a>(items: &'a [Item], item_id: &str) -> Result<&'a Item> {
    find_item(items, item_id).ok_or_else(|| AppError::NotFound(format!("item {item_id}")))
}

/// One listing line: id, name, price and stock status.
pub fn item_line(item: &Item) -> String {
    let status = if !item.is_available {
        "Out of Stock".to_string()
    } else if let Some(left) = item.low_stock() {
        format!("Only {left} left")
    } else {
        "In Stock".to_string()
    };
    format!(
        "{:<12} {:<32} {:>14}  {}",
        item.item_id, item.name, item.price, status
    )
}

/// Print the filtered and sorted listing.
///
/// # Errors
///
/// Returns `BadRequest` for invalid price bounds.
#[allow(clippy::print_stdout)]
pub fn list(items: &[Item], args: ListArgs) -> Result<()> {
    let query = args.into_query()?;
    let max_price = derive_max_price(items);
    let visible = query.apply(items);

    for item in &visible {
        println!("{}", item_line(item));
    }

    if visible.is_empty() {
        println!("No items found");
    }
    let (min, max) = query.filters.price_range.effective(max_price);
    let resolved = FilterState {
        price_range: PriceRange::between(min, max),
        ..query.filters
    };
    if resolved.has_active_filters(max_price) {
        println!(
            "Showing {} of {} items ({min} - {max}, {})",
            visible.len(),
            items.len(),
            query.filters.availability
        );
    } else {
        println!("Showing {} of {} items", visible.len(), items.len());
    }
    Ok(())
}

/// Select `item_ids` for comparison in order and print the attribute table.
///
/// # Errors
///
/// Returns `NotFound` if an id is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn compare(items: &[Item], item_ids: &[String]) -> Result<()> {
    let mut selection = ComparisonSet::new();
    for item_id in item_ids {
        let item = require_item(items, item_id)?;
        if selection.is_full() && !selection.contains(item_id) {
            tracing::warn!(
                item_id = %item_id,
                max = MAX_COMPARISON_ITEMS,
                "Comparison is full, skipping item"
            );
            continue;
        }
        selection = toggle_comparison(&selection, item, true);
    }

    for row in selection.comparison_rows() {
        println!("{:<14} {}", row.label, row.values.join(" | "));
    }
    Ok(())
}

/// Print items sharing the category of `item_id`.
///
/// # Errors
///
/// Returns `NotFound` if `item_id` is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn related(items: &[Item], item_id: &str) -> Result<()> {
    let current = require_item(items, item_id)?;
    let related = related_items(current, items, DEFAULT_RELATED_ITEMS);

    if related.is_empty() {
        println!("No related items in {}", current.category);
    }
    for item in &related {
        println!("{}", item_line(item));
    }
    Ok(())
}

/// Print each category once.
#[allow(clippy::print_stdout)]
pub fn categories(items: &[Item]) {
    for category in catalog::categories(items) {
        println!("{category}");
    }
}
