//! Shop item records as served by the catalog backend.

use serde::{Deserialize, Serialize};

use super::cart::{CartCandidate, DEFAULT_ITEM_TYPE};
use super::id::ItemId;
use super::price::Price;

/// Items with fewer units than this (but more than zero) are flagged as
/// running low.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// A purchasable digital item.
///
/// Items are read-only once ingested. The `is_available` flag is taken as
/// declared by the backend; it is not derived from `stock`. Use
/// [`Item::is_stock_consistent`] to spot records where the two disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Backend identifier.
    pub item_id: ItemId,
    /// Display name.
    pub name: String,
    /// Long-form description, searched alongside the name.
    pub description: String,
    /// Category tag (e.g. `Themes`, `Icons`).
    pub category: String,
    /// Unit price in SBD.
    pub price: Price,
    /// Optional image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Units in stock.
    pub stock: u32,
    /// Whether the item can currently be bought.
    pub is_available: bool,
    /// Free-form attributes (features, compatibility, version, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Item {
    /// Returns the remaining stock when the item is in stock but running low.
    #[must_use]
    pub const fn low_stock(&self) -> Option<u32> {
        if self.stock > 0 && self.stock < LOW_STOCK_THRESHOLD {
            Some(self.stock)
        } else {
            None
        }
    }

    /// Whether the availability flag agrees with the stock count
    /// (available with stock, or unavailable without).
    #[must_use]
    pub const fn is_stock_consistent(&self) -> bool {
        self.is_available == (self.stock > 0)
    }

    /// Build the cart candidate for this item.
    #[must_use]
    pub fn to_cart_candidate(&self) -> CartCandidate {
        CartCandidate {
            item_id: self.item_id.clone(),
            item_type: DEFAULT_ITEM_TYPE.to_owned(),
            name: self.name.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
        }
    }
}
