//! Pure cart state transitions.

use digital_shop_core::{CartCandidate, CartEntry, Price};

/// The cart's entries in insertion order.
///
/// This type does no I/O. [`CartStore`](super::CartStore) wraps it with
/// persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    items: Vec<CartEntry>,
}

impl CartState {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from stored entries.
    ///
    /// Entries with a zero quantity are dropped and duplicate ids are merged
    /// into the first occurrence, so the result always upholds the cart
    /// invariants even if the stored data did not.
    #[must_use]
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let mut state = Self::new();
        for entry in entries {
            if entry.quantity == 0 {
                continue;
            }
            match state.find_mut(entry.item_id.as_str()) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(entry.quantity);
                }
                None => state.items.push(entry),
            }
        }
        state
    }

    /// Add one unit of `candidate`.
    ///
    /// An existing entry keeps its stored name, price and image and only has
    /// its quantity bumped. Stock limits are not checked here.
    pub fn add_item(&mut self, candidate: CartCandidate) {
        if let Some(existing) = self.find_mut(candidate.item_id.as_str()) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }
        self.items.push(CartEntry::from_candidate(candidate));
    }

    /// Remove the entry for `item_id`. Returns `false` if there was none.
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|entry| entry.item_id != item_id);
        self.items.len() != before
    }

    /// Set the quantity for `item_id`.
    ///
    /// A quantity of zero removes the entry. Returns `false` if there was no
    /// entry for `item_id`.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(item_id);
        }
        match self.find_mut(item_id) {
            Some(entry) => {
                entry.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|entry| u64::from(entry.quantity)).sum()
    }

    /// Sum of unit price times quantity over all entries.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartEntry::line_total).sum()
    }

    /// Whether the cart holds an entry for `item_id`.
    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.get(item_id).is_some()
    }

    /// The entry for `item_id`, if any.
    #[must_use]
    pub fn get(&self, item_id: &str) -> Option<&CartEntry> {
        self.items.iter().find(|entry| entry.item_id == item_id)
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.items
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, item_id: &str) -> Option<&mut CartEntry> {
        self.items.iter_mut().find(|entry| entry.item_id == item_id)
    }
}
