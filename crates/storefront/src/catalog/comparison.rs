//! Side-by-side item comparison.

use digital_shop_core::Item;

/// Maximum number of items in a comparison.
pub const MAX_COMPARISON_ITEMS: usize = 4;

/// Up to [`MAX_COMPARISON_ITEMS`] distinct items, in the order they were
/// selected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonSet {
    items: Vec<Item>,
}

/// One attribute row of the comparison table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub values: Vec<String>,
}

impl ComparisonSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.items.len() >= MAX_COMPARISON_ITEMS
    }

    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.item_id == item_id)
    }

    /// A copy of this set without `item_id`.
    #[must_use]
    pub fn remove(&self, item_id: &str) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| item.item_id != item_id)
                .cloned()
                .collect(),
        }
    }

    /// The attribute table shown when comparing: one row per attribute, one
    /// value per selected item.
    #[must_use]
    pub fn comparison_rows(&self) -> Vec<ComparisonRow> {
        let row = |label, value: fn(&Item) -> String| ComparisonRow {
            label,
            values: self.items.iter().map(value).collect(),
        };

        vec![
            row("Name", |item| item.name.clone()),
            row("Category", |item| item.category.clone()),
            row("Price", |item| item.price.to_string()),
            row("Stock", |item| item.stock.to_string()),
            row("Availability", |item| {
                if item.is_available {
                    "In Stock".to_string()
                } else {
                    "Out of Stock".to_string()
                }
            }),
            row("Description", |item| item.description.clone()),
        ]
    }
}

/// Select or deselect `item` for comparison.
///
/// Selecting adds the item at the end unless it is already present or the
/// set is full, in which case nothing changes. Deselecting removes it by id.
#[must_use]
pub fn toggle_comparison(current: &ComparisonSet, item: &Item, selected: bool) -> ComparisonSet {
    if !selected {
        return current.remove(item.item_id.as_str());
    }
    if current.is_full() || current.contains(item.item_id.as_str()) {
        return current.clone();
    }

    let mut next = current.clone();
    next.items.push(item.clone());
    next
}

/// An empty comparison.
#[must_use]
pub const fn clear_comparison() -> ComparisonSet {
    ComparisonSet::new()
}
