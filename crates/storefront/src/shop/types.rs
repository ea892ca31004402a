//! Request and response payloads for the shop REST API.

use serde::{Deserialize, Serialize};

use digital_shop_core::{CartEntry, Item, ItemId};

/// Body of `POST /shop/cart/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineRequest {
    pub item_id: ItemId,
    pub item_type: String,
    pub quantity: u32,
}

impl From<&CartEntry> for CartLineRequest {
    fn from(entry: &CartEntry) -> Self {
        Self {
            item_id: entry.item_id.clone(),
            item_type: entry.item_type.clone(),
            quantity: entry.quantity,
        }
    }
}

/// `GET /shop/items` answers either a bare array or `{"items": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ItemsResponse {
    Bare(Vec<Item>),
    Wrapped { items: Vec<Item> },
}

impl ItemsResponse {
    pub(super) fn into_items(self) -> Vec<Item> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Error body returned by the backend, e.g. `{"detail": "Insufficient balance"}`.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorBody {
    pub detail: serde_json::Value,
}
