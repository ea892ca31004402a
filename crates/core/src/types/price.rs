//! Type-safe price representation using decimal arithmetic.
//!
//! Every price in the shop is denominated in SBD, the shop's display
//! currency unit, so a [`Price`] carries only its amount.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display currency unit shown alongside every amount.
pub const CURRENCY_UNIT: &str = "SBD";

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative amount of SBD.
///
/// ## Examples
///
/// ```
/// use digital_shop_core::Price;
///
/// let price = Price::from_units(500);
/// assert_eq!(price.to_string(), "500 SBD");
/// assert_eq!(price.times(2), Price::from_units(1000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of SBD.
    #[must_use]
    pub fn from_units(units: u32) -> Self {
        Self(Decimal::from(units))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    ///
    /// Saturates at [`Decimal::MAX`] instead of overflowing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{} {CURRENCY_UNIT}", self.0.normalize()))
    }
}

impl Add for Price {
    type Output = Self;

    // Saturating, like `times`.
    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

// Backend payloads carry prices as JSON numbers; persisted carts carry them as
// strings. Both go through the non-negative check.
impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let result = Price::new(Decimal::new(-1, 0));
        assert_eq!(result, Err(PriceError::Negative(Decimal::new(-1, 0))));
    }

    #[test]
    fn test_display_appends_currency_unit() {
        assert_eq!(Price::from_units(750).to_string(), "750 SBD");
        assert_eq!(Price::new(Decimal::new(1250, 2)).unwrap().to_string(), "12.5 SBD");
    }

    #[test]
    fn test_sum_of_empty_is_zero() {
        let total: Price = Vec::<Price>::new().into_iter().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let huge = Price::new(Decimal::from_i128_with_scale(10_i128.pow(28), 0)).unwrap();
        let max = Price::new(Decimal::MAX).unwrap();

        assert_eq!(huge.times(10), max);
        assert_eq!(max + Price::from_units(1), max);
        assert_eq!(std::iter::repeat_n(huge, 8).sum::<Price>(), max);
        assert_eq!(Price::from_units(3).times(4), Price::from_units(12));
    }

    #[test]
    fn test_deserialize_number_and_string() {
        let from_number: Price = serde_json::from_str("500").unwrap();
        let from_string: Price = serde_json::from_str("\"500\"").unwrap();
        assert_eq!(from_number, Price::from_units(500));
        assert_eq!(from_string, Price::from_units(500));
    }

    #[test]
    fn test_deserialize_negative_fails() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
