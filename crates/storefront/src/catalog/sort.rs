//! Sort keys for the shop listing.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use digital_shop_core::Item;

/// Listing order.
///
/// `Newest` and `Popular` keep the source order: items carry no timestamp or
/// popularity figure to sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    #[default]
    Newest,
    Popular,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::PriceAsc,
        Self::PriceDesc,
        Self::Newest,
        Self::Popular,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Newest => "newest",
            Self::Popular => "popular",
        }
    }

    /// Sort `items` in place. The sort is stable.
    pub fn sort(self, items: &mut [Item]) {
        match self {
            Self::NameAsc => items.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
            Self::NameDesc => items.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
            Self::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Newest | Self::Popular => {}
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("invalid sort key: {s}"))
    }
}

/// Human-friendly string ordering.
///
/// Three levels, like a root-locale collator: base letters ignoring accents
/// and case, then accents (unaccented first), then case (lowercase first).
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| folded(a).cmp(folded(b)))
        // Byte order puts uppercase first, so reverse it for the tie-break.
        .then_with(|| b.cmp(a))
}

fn folded(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    folded(s).filter(|c| !is_combining_mark(*c))
}
