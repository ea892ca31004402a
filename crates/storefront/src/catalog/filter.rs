//! Filter state for the shop listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use digital_shop_core::{Item, Price};

/// Which items to show by availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// No restriction.
    #[default]
    All,
    /// Only items flagged available.
    InStock,
    /// Only items flagged unavailable.
    OutOfStock,
}

impl Availability {
    /// Whether `item` passes this availability mode.
    #[must_use]
    pub const fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::InStock => item.is_available,
            Self::OutOfStock => !item.is_available,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::InStock => "in_stock",
            Self::OutOfStock => "out_of_stock",
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Availability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "in_stock" => Ok(Self::InStock),
            "out_of_stock" => Ok(Self::OutOfStock),
            _ => Err(format!("invalid availability: {s}")),
        }
    }
}

/// Inclusive price bounds. Unset bounds fall back to `0` and the listing's
/// maximum price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Price>,
    pub max: Option<Price>,
}

impl PriceRange {
    /// A range with both bounds set. Bounds given in the wrong order are
    /// swapped.
    #[must_use]
    pub fn between(a: Price, b: Price) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// The concrete bounds given the listing's maximum price.
    #[must_use]
    pub fn effective(&self, max_price: Price) -> (Price, Price) {
        (
            self.min.unwrap_or(Price::ZERO),
            self.max.unwrap_or(max_price),
        )
    }
}

/// Price range and availability selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub availability: Availability,
}

impl FilterState {
    /// Filters showing everything up to `max_price`.
    #[must_use]
    pub const fn reset(max_price: Price) -> Self {
        Self {
            price_range: PriceRange {
                min: Some(Price::ZERO),
                max: Some(max_price),
            },
            availability: Availability::All,
        }
    }

    /// Whether anything narrower than [`FilterState::reset`] is selected.
    ///
    /// An unset bound counts as differing from the reset value, matching how
    /// the filter panel offers its "Reset" action.
    #[must_use]
    pub fn has_active_filters(&self, max_price: Price) -> bool {
        self.price_range.min != Some(Price::ZERO)
            || self.price_range.max != Some(max_price)
            || self.availability != Availability::All
    }

    /// Whether `item` passes the price range and availability checks.
    #[must_use]
    pub fn matches(&self, item: &Item, max_price: Price) -> bool {
        let (min, max) = self.price_range.effective(max_price);
        item.price >= min && item.price <= max && self.availability.matches(item)
    }
}
