//! Cart line records.

use serde::{Deserialize, Serialize};

use super::id::ItemId;
use super::price::Price;

/// Item type tag sent with catalog items when they are added to the cart.
pub const DEFAULT_ITEM_TYPE: &str = "shop_item";

/// What the caller hands to the cart when adding an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCandidate {
    pub item_id: ItemId,
    pub item_type: String,
    pub name: String,
    pub price: Price,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// One line in the cart.
///
/// A cart holds at most one entry per `item_id`, and `quantity` is never
/// zero: dropping to zero removes the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub item_id: ItemId,
    pub item_type: String,
    pub name: String,
    pub price: Price,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CartEntry {
    /// Start a new entry with a quantity of one.
    #[must_use]
    pub fn from_candidate(candidate: CartCandidate) -> Self {
        Self {
            item_id: candidate.item_id,
            item_type: candidate.item_type,
            name: candidate.name,
            price: candidate.price,
            quantity: 1,
            image_url: candidate.image_url,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}
