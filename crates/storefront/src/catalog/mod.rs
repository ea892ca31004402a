//! Catalog view-model: derives what the shop listing shows.
//!
//! Everything here is value-in/value-out. The source item list is supplied
//! by the caller (a JSON file or the shop API) and never modified.
//!
//! # Modules
//!
//! - [`filter`] - price range and availability selection
//! - [`sort`] - listing order
//! - [`comparison`] - bounded side-by-side comparison set
//! - [`related`] - same-category suggestions
//!
//! # Example
//!
//! ```rust,ignore
//! let items = catalog::load_items(Path::new("catalog.json"))?;
//! let query = CatalogQuery {
//!     search: "theme".to_string(),
//!     sort: SortKey::PriceAsc,
//!     ..CatalogQuery::default()
//! };
//! for item in query.apply(&items) {
//!     println!("{} - {}", item.name, item.price);
//! }
//! ```

pub mod comparison;
pub mod filter;
pub mod related;
pub mod sort;
mod view_model;

pub use comparison::{
    ComparisonRow, ComparisonSet, MAX_COMPARISON_ITEMS, clear_comparison, toggle_comparison,
};
pub use filter::{Availability, FilterState, PriceRange};
pub use related::{DEFAULT_RELATED_ITEMS, related_items};
pub use sort::{SortKey, locale_cmp};
pub use view_model::{CatalogQuery, DEFAULT_MAX_PRICE, categories, derive_max_price, filter_and_sort};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::instrument;

use digital_shop_core::Item;

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON array of items.
    #[error("Invalid catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Accept an item list from an external source.
///
/// Items whose availability flag disagrees with their stock count are kept
/// as declared and logged, so bad backend data shows up in the logs instead
/// of being silently rewritten.
#[must_use]
pub fn ingest(items: Vec<Item>) -> Vec<Item> {
    for item in items.iter().filter(|item| !item.is_stock_consistent()) {
        tracing::warn!(
            item_id = %item.item_id,
            stock = item.stock,
            is_available = item.is_available,
            "Item availability disagrees with stock"
        );
    }
    items
}

/// Load and [`ingest`] a JSON array of items from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
#[instrument]
pub fn load_items(path: &Path) -> Result<Vec<Item>, CatalogError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items: Vec<Item> = serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(count = items.len(), "Catalog loaded");
    Ok(ingest(items))
}

/// Find an item by id.
#[must_use]
pub fn find_item<'a>(items: &'a [Item], item_id: &str) -> Option<&'a Item> {
    items.iter().find(|item| item.item_id == item_id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"item_id": "item_1", "name": "Premium Dark Theme", "description": "Dark theme.",
         "category": "Themes", "price": 500, "stock": 100, "is_available": true},
        {"item_id": "item_5", "name": "Minimalist UI Kit", "description": "Minimal UI.",
         "category": "Themes", "price": 400, "stock": 0, "is_available": false}
    ]"#;

    #[test]
    fn test_load_items() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 2);
        assert!(find_item(&items, "item_5").is_some());
        assert!(find_item(&items, "item_9").is_none());
    }

    #[test]
    fn test_load_items_missing_file() {
        let err = load_items(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_load_items_rejects_negative_price() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"[{"item_id": "x", "name": "X", "description": "", "category": "Themes",
                 "price": -5, "stock": 1, "is_available": true}]"#,
        )
        .unwrap();

        assert!(matches!(load_items(&path).unwrap_err(), CatalogError::Parse { .. }));
    }

    #[test]
    fn test_ingest_keeps_inconsistent_items() {
        let items: Vec<Item> = serde_json::from_str(CATALOG).unwrap();
        let mut inconsistent = items[0].clone();
        inconsistent.stock = 0;

        let ingested = ingest(vec![inconsistent]);
        assert_eq!(ingested.len(), 1);
        assert!(ingested[0].is_available);
    }
}
