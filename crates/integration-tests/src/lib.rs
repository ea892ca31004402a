//! Integration tests for the digital shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p digital-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutations and persistence across store instances
//! - `catalog_listing` - Filtering, sorting, comparison and related items
//! - `checkout_flow` - Checkout against a mock shop API
//!
//! This crate only holds shared fixtures. `checkout_flow` serves its mock API
//! with axum on an ephemeral loopback port, so it needs no external network.

#![cfg_attr(not(test), forbid(unsafe_code))]

use digital_shop_core::{Item, ItemId, Price};
use digital_shop_storefront::catalog;

/// Six-item catalog spanning four categories, one item sold out.
pub const CATALOG_JSON: &str = include_str!("../fixtures/catalog.json");

/// Parse and ingest [`CATALOG_JSON`].
///
/// # Panics
///
/// Panics if the fixture is not valid item JSON.
#[must_use]
#[allow(clippy::expect_used)]
pub fn sample_items() -> Vec<Item> {
    let items = serde_json::from_str(CATALOG_JSON).expect("fixture catalog should parse");
    catalog::ingest(items)
}

/// A minimal available item.
#[must_use]
pub fn item(id: &str, name: &str, category: &str, price: u32) -> Item {
    Item {
        item_id: ItemId::new(id),
        name: name.to_string(),
        description: String::new(),
        category: category.to_string(),
        price: Price::from_units(price),
        image_url: None,
        stock: 20,
        is_available: true,
        metadata: None,
    }
}

/// Ids of `items`, in order.
#[must_use]
pub fn ids(items: &[Item]) -> Vec<&str> {
    items.iter().map(|item| item.item_id.as_str()).collect()
}
