//! "Similar items" suggestions for an item detail view.

use digital_shop_core::Item;

/// How many suggestions the detail view shows by default.
pub const DEFAULT_RELATED_ITEMS: usize = 6;

/// Available items sharing `current`'s category, excluding `current`, in
/// source order and capped at `max`.
#[must_use]
pub fn related_items(current: &Item, all: &[Item], max: usize) -> Vec<Item> {
    all.iter()
        .filter(|item| {
            item.category == current.category
                && item.item_id != current.item_id
                && item.is_available
        })
        .take(max)
        .cloned()
        .collect()
}
