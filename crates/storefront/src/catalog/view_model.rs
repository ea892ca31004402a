//! Listing derivation: search, category, filters and sort over a source list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use digital_shop_core::{Item, Price};

use super::filter::FilterState;
use super::sort::SortKey;

/// Lowest upper bound offered by the price filter.
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::ONE_THOUSAND;

/// Highest unit price in `items`, never below [`DEFAULT_MAX_PRICE`].
#[must_use]
pub fn derive_max_price(items: &[Item]) -> Price {
    let floor = Price::new(DEFAULT_MAX_PRICE).unwrap_or(Price::ZERO);
    items
        .iter()
        .map(|item| item.price)
        .fold(floor, Price::max)
}

/// Whether `item`'s name or description contains `needle`
/// (already lowercased).
fn matches_search(item: &Item, needle: &str) -> bool {
    needle.is_empty()
        || item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
}

/// Compute the visible listing.
///
/// Applies, in order: case-insensitive search over name or description, exact
/// category match when one is selected, the price range (unset bounds default
/// to `0` and [`derive_max_price`]), and the availability mode. The survivors
/// are then ordered by `sort_key`. `items` is never modified.
#[must_use]
#[instrument(skip(items, filters), fields(source = items.len()))]
pub fn filter_and_sort(
    items: &[Item],
    search: &str,
    category: Option<&str>,
    filters: &FilterState,
    sort_key: SortKey,
) -> Vec<Item> {
    let needle = search.to_lowercase();
    let max_price = derive_max_price(items);

    let mut visible: Vec<Item> = items
        .iter()
        .filter(|item| matches_search(item, &needle))
        .filter(|item| category.is_none_or(|c| item.category == c))
        .filter(|item| filters.matches(item, max_price))
        .cloned()
        .collect();

    sort_key.sort(&mut visible);
    visible
}

/// Distinct category tags in first-seen order.
#[must_use]
pub fn categories(items: &[Item]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for item in items {
        if !seen.contains(&item.category.as_str()) {
            seen.push(&item.category);
        }
    }
    seen
}

/// Everything the listing page lets a shopper choose, bundled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub filters: FilterState,
    #[serde(default)]
    pub sort: SortKey,
}

impl CatalogQuery {
    /// Run [`filter_and_sort`] with this query.
    #[must_use]
    pub fn apply(&self, items: &[Item]) -> Vec<Item> {
        filter_and_sort(
            items,
            &self.search,
            self.category.as_deref(),
            &self.filters,
            self.sort,
        )
    }
}
