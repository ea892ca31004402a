//! Integration tests for the catalog listing view-model.
//!
//! Runs against the six-item fixture catalog: four categories, prices from
//! 300 to 1000 SBD, `item_5` sold out and `item_3` low on stock.

#![allow(clippy::unwrap_used)]

use digital_shop_core::Price;
use digital_shop_integration_tests::{ids, item, sample_items};
use digital_shop_storefront::catalog::{
    Availability, CatalogQuery, ComparisonSet, DEFAULT_RELATED_ITEMS, FilterState,
    MAX_COMPARISON_ITEMS, PriceRange, SortKey, categories, clear_comparison, derive_max_price,
    filter_and_sort, find_item, related_items, toggle_comparison,
};

fn in_range(min: u32, max: u32) -> FilterState {
    FilterState {
        price_range: PriceRange::between(Price::from_units(min), Price::from_units(max)),
        availability: Availability::All,
    }
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn test_no_criteria_shows_everything_in_source_order() {
    let items = sample_items();
    let visible = filter_and_sort(&items, "", None, &FilterState::default(), SortKey::Newest);

    assert_eq!(
        ids(&visible),
        ["item_1", "item_2", "item_3", "item_4", "item_5", "item_6"]
    );
}

#[test]
fn test_search_matches_name_or_description_ignoring_case() {
    let items = sample_items();

    let by_name = filter_and_sort(&items, "DARK", None, &FilterState::default(), SortKey::Newest);
    assert_eq!(ids(&by_name), ["item_1"]);

    let by_description =
        filter_and_sort(&items, "template", None, &FilterState::default(), SortKey::Newest);
    assert_eq!(ids(&by_description), ["item_3", "item_6"]);

    let none = filter_and_sort(&items, "spaceship", None, &FilterState::default(), SortKey::Newest);
    assert!(none.is_empty());
}

#[test]
fn test_category_is_exact_match() {
    let items = sample_items();

    let themes = filter_and_sort(&items, "", Some("Themes"), &FilterState::default(), SortKey::Newest);
    assert_eq!(ids(&themes), ["item_1", "item_5"]);

    let lowercase =
        filter_and_sort(&items, "", Some("themes"), &FilterState::default(), SortKey::Newest);
    assert!(lowercase.is_empty());
}

#[test]
fn test_availability_modes() {
    let items = sample_items();
    let with = |availability| FilterState {
        availability,
        ..FilterState::default()
    };

    let in_stock = filter_and_sort(&items, "", None, &with(Availability::InStock), SortKey::Newest);
    assert_eq!(in_stock.len(), 5);
    assert!(in_stock.iter().all(|item| item.is_available));

    let sold_out =
        filter_and_sort(&items, "", None, &with(Availability::OutOfStock), SortKey::Newest);
    assert_eq!(ids(&sold_out), ["item_5"]);
}

#[test]
fn test_price_range_is_inclusive() {
    let items = sample_items();

    let visible = filter_and_sort(&items, "", None, &in_range(400, 750), SortKey::Newest);
    assert_eq!(ids(&visible), ["item_1", "item_3", "item_5"]);

    let exact = filter_and_sort(&items, "", None, &in_range(1000, 1000), SortKey::Newest);
    assert_eq!(ids(&exact), ["item_4"]);
}

#[test]
fn test_open_upper_bound_follows_listing_maximum() {
    let mut items = sample_items();
    items.push(item("item_7", "Enterprise Suite", "Plugins", 2500));
    assert_eq!(derive_max_price(&items), Price::from_units(2500));

    let filters = FilterState {
        price_range: PriceRange {
            min: Some(Price::from_units(950)),
            max: None,
        },
        availability: Availability::All,
    };
    let visible = filter_and_sort(&items, "", None, &filters, SortKey::Newest);

    assert_eq!(ids(&visible), ["item_4", "item_7"]);
}

#[test]
fn test_criteria_combine() {
    let items = sample_items();
    let filters = FilterState {
        price_range: PriceRange::between(Price::from_units(300), Price::from_units(800)),
        availability: Availability::InStock,
    };

    let visible = filter_and_sort(&items, "", Some("Themes"), &filters, SortKey::PriceAsc);

    assert_eq!(ids(&visible), ["item_1"]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_by_price() {
    let items = sample_items();

    let ascending = filter_and_sort(&items, "", None, &FilterState::default(), SortKey::PriceAsc);
    assert_eq!(
        ids(&ascending),
        ["item_2", "item_5", "item_1", "item_3", "item_6", "item_4"]
    );

    let descending = filter_and_sort(&items, "", None, &FilterState::default(), SortKey::PriceDesc);
    assert_eq!(
        ids(&descending),
        ["item_4", "item_6", "item_3", "item_1", "item_5", "item_2"]
    );
}

#[test]
fn test_sort_by_name() {
    let items = sample_items();

    let ascending = filter_and_sort(&items, "", None, &FilterState::default(), SortKey::NameAsc);
    assert_eq!(
        ids(&ascending),
        ["item_4", "item_3", "item_6", "item_2", "item_5", "item_1"]
    );

    let descending = filter_and_sort(&items, "", None, &FilterState::default(), SortKey::NameDesc);
    assert_eq!(
        ids(&descending),
        ["item_1", "item_5", "item_2", "item_6", "item_3", "item_4"]
    );
}

#[test]
fn test_listing_is_idempotent_and_leaves_source_alone() {
    let items = sample_items();
    let before = items.clone();
    let query = CatalogQuery {
        search: "e".to_string(),
        category: None,
        filters: in_range(350, 950),
        sort: SortKey::PriceDesc,
    };

    let once = query.apply(&items);
    let twice = query.apply(&once);

    assert_eq!(once, twice);
    assert_eq!(items, before);
}

#[test]
fn test_query_from_json() {
    let items = sample_items();
    let query: CatalogQuery = serde_json::from_str(
        r#"{
            "search": "theme",
            "filters": {
                "price_range": {"min": "0", "max": 600},
                "availability": "in_stock"
            },
            "sort": "price_asc"
        }"#,
    )
    .unwrap();

    assert_eq!(query.category, None);
    assert_eq!(ids(&query.apply(&items)), ["item_1"]);
}

// ============================================================================
// Filter panel state
// ============================================================================

#[test]
fn test_reset_filters_are_inactive() {
    let items = sample_items();
    let max_price = derive_max_price(&items);
    let reset = FilterState::reset(max_price);

    assert!(!reset.has_active_filters(max_price));
    assert_eq!(
        filter_and_sort(&items, "", None, &reset, SortKey::Newest).len(),
        items.len()
    );

    let narrowed = FilterState {
        availability: Availability::OutOfStock,
        ..reset
    };
    assert!(narrowed.has_active_filters(max_price));
}

#[test]
fn test_categories_in_first_seen_order() {
    let items = sample_items();
    assert_eq!(categories(&items), ["Themes", "Icons", "Templates", "Plugins"]);
}

#[test]
fn test_low_stock_badge() {
    let items = sample_items();
    assert_eq!(find_item(&items, "item_3").unwrap().low_stock(), Some(8));
    assert_eq!(find_item(&items, "item_1").unwrap().low_stock(), None);
    assert_eq!(find_item(&items, "item_5").unwrap().low_stock(), None);
}

// ============================================================================
// Comparison and related items
// ============================================================================

#[test]
fn test_comparison_caps_at_four() {
    let items = sample_items();
    let mut selection = ComparisonSet::new();
    for item in &items {
        selection = toggle_comparison(&selection, item, true);
    }

    assert_eq!(selection.len(), MAX_COMPARISON_ITEMS);
    assert_eq!(
        ids(selection.items()),
        ["item_1", "item_2", "item_3", "item_4"]
    );

    let fifth = find_item(&items, "item_5").unwrap();
    assert_eq!(toggle_comparison(&selection, fifth, true), selection);

    let without_second = toggle_comparison(&selection, &items[1], false);
    assert_eq!(ids(without_second.items()), ["item_1", "item_3", "item_4"]);

    assert!(clear_comparison().is_empty());
}

#[test]
fn test_comparison_rows() {
    let items = sample_items();
    let mut selection = ComparisonSet::new();
    for id in ["item_4", "item_5"] {
        selection = toggle_comparison(&selection, find_item(&items, id).unwrap(), true);
    }

    let rows = selection.comparison_rows();
    let row = |label: &str| {
        rows.iter()
            .find(|row| row.label == label)
            .unwrap()
            .values
            .clone()
    };

    assert_eq!(row("Name"), ["AI Chat Plugin", "Minimalist UI Kit"]);
    assert_eq!(row("Price"), ["1000 SBD", "400 SBD"]);
    assert_eq!(row("Availability"), ["In Stock", "Out of Stock"]);
}

#[test]
fn test_related_items_share_category() {
    let items = sample_items();

    let dashboard = find_item(&items, "item_3").unwrap();
    assert_eq!(
        ids(&related_items(dashboard, &items, DEFAULT_RELATED_ITEMS)),
        ["item_6"]
    );

    // The only other theme is sold out.
    let theme = find_item(&items, "item_1").unwrap();
    assert!(related_items(theme, &items, DEFAULT_RELATED_ITEMS).is_empty());
}
