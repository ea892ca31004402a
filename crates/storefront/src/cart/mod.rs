//! Client-side shopping cart.
//!
//! # Architecture
//!
//! - [`CartState`] holds the entries and implements every transition as a
//!   pure, storage-free method
//! - [`CartStore`] owns a `CartState` plus a [`CartStorage`] backend; it is
//!   created once by the application root via [`CartStore::load`] and passed
//!   to whatever needs the cart
//! - Every mutation through `CartStore` is followed by a best-effort
//!   [`CartStore::save`]. A failed save is logged and the in-memory cart stays
//!   authoritative for the session
//!
//! # Example
//!
//! ```rust
//! use digital_shop_core::{CartCandidate, ItemId, Price};
//! use digital_shop_storefront::cart::{CartStore, MemoryStorage};
//!
//! let mut cart = CartStore::load(MemoryStorage::new());
//! let candidate = CartCandidate {
//!     item_id: ItemId::new("x"),
//!     item_type: "shop_item".to_string(),
//!     name: "Premium Dark Theme".to_string(),
//!     price: Price::from_units(500),
//!     image_url: None,
//! };
//! cart.add_item(candidate.clone());
//! cart.add_item(candidate);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price(), Price::from_units(1000));
//! ```

mod state;
mod storage;

pub use state::CartState;
pub use storage::{CART_STORAGE_KEY, CartStorage, JsonFileStorage, MemoryStorage, StorageError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use digital_shop_core::{CartCandidate, CartEntry, Price};

/// Version of the persisted cart envelope.
const FORMAT_VERSION: u32 = 1;

/// What gets written under [`CART_STORAGE_KEY`].
#[derive(Debug, Serialize, Deserialize)]
struct PersistedCart {
    version: u32,
    saved_at: DateTime<Utc>,
    items: Vec<CartEntry>,
}

/// The cart plus the storage it persists to.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate the cart from `storage`.
    ///
    /// Missing, unreadable or corrupt data yields an empty cart; the problem
    /// is logged and the next successful save overwrites it.
    pub fn load(storage: S) -> Self {
        let state = match read_state(&storage) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to restore cart, starting empty");
                CartState::new()
            }
        };
        Self { state, storage }
    }

    /// Rehydrate the cart from `storage`, surfacing any failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored cart cannot be read or decoded.
    pub fn try_load(storage: S) -> Result<Self, StorageError> {
        let state = read_state(&storage)?;
        Ok(Self { state, storage })
    }

    /// Write the whole cart under [`CART_STORAGE_KEY`].
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the storage write fails.
    #[instrument(skip(self), fields(entries = self.state.len()))]
    pub fn save(&self) -> Result<(), StorageError> {
        let persisted = PersistedCart {
            version: FORMAT_VERSION,
            saved_at: Utc::now(),
            items: self.state.entries().to_vec(),
        };
        let json = serde_json::to_string(&persisted)?;
        self.storage.write(CART_STORAGE_KEY, &json)
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            tracing::warn!(error = %e, "Failed to persist cart, keeping in-memory state");
        }
    }

    /// Add one unit of `candidate` and persist.
    pub fn add_item(&mut self, candidate: CartCandidate) {
        tracing::debug!(item_id = %candidate.item_id, "Adding item to cart");
        self.state.add_item(candidate);
        self.persist();
    }

    /// Remove the entry for `item_id` and persist. Returns `false` if there
    /// was none.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let removed = self.state.remove_item(item_id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Set the quantity for `item_id` (zero removes) and persist. Returns
    /// `false` if there was no entry for `item_id`.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> bool {
        let updated = self.state.update_quantity(item_id, quantity);
        if updated {
            self.persist();
        }
        updated
    }

    /// Empty the cart and persist.
    pub fn clear_cart(&mut self) {
        self.state.clear();
        self.persist();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.total_items()
    }

    /// Sum of unit price times quantity.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.state.total_price()
    }

    /// Read-only view of the cart.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }
}

fn read_state<S: CartStorage>(storage: &S) -> Result<CartState, StorageError> {
    let Some(raw) = storage.read(CART_STORAGE_KEY)? else {
        return Ok(CartState::new());
    };
    let persisted: PersistedCart = serde_json::from_str(&raw)?;
    if persisted.version != FORMAT_VERSION {
        return Err(StorageError::UnsupportedVersion {
            found: persisted.version,
            expected: FORMAT_VERSION,
        });
    }
    Ok(CartState::from_entries(persisted.items))
}
