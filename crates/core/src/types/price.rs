//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are kept as [`Decimal`] so cart totals are exact. Rendering goes
//! through a [`PriceFormat`], which carries the locale's thousands and
//! decimal separators:
//!
//! ```
//! use rust_decimal::Decimal;
//! use storecart_core::{Price, PriceFormat};
//!
//! let price = Price::new(Decimal::new(123_450, 2));
//! assert_eq!(PriceFormat::ES_AR.format(price), "1.234,50");
//! assert_eq!(PriceFormat::EN_US.display(price), "$1,234.50");
//! ```

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in the storefront's single currency.
///
/// Serialized as a JSON number (`10.5`) so snapshots stay readable by the
/// page script that first wrote them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Price of `quantity` units, saturating at [`Decimal::MAX`].
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&PriceFormat::default().format(*self))
    }
}

/// Error returned for a locale tag with no known price format.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct LocaleError(String);

/// Locale-specific rendering of prices with exactly two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFormat {
    thousands_separator: char,
    decimal_separator: char,
    symbol: &'static str,
}

impl PriceFormat {
    /// Argentine Spanish: `1.234,50`.
    pub const ES_AR: Self = Self {
        thousands_separator: '.',
        decimal_separator: ',',
        symbol: "$",
    };

    /// US English: `1,234.50`.
    pub const EN_US: Self = Self {
        thousands_separator: ',',
        decimal_separator: '.',
        symbol: "$",
    };

    /// Look up the format for a BCP 47 locale tag (`es-AR`, `en_US`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`LocaleError`] if the tag is not supported.
    pub fn for_locale(tag: &str) -> Result<Self, LocaleError> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "es-ar" | "es" => Ok(Self::ES_AR),
            "en-us" | "en" => Ok(Self::EN_US),
            _ => Err(LocaleError(tag.to_string())),
        }
    }

    /// Currency symbol printed by [`Self::display`].
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// Format the amount with two decimals and grouped thousands.
    ///
    /// Midpoints round away from zero.
    #[must_use]
    pub fn format(&self, price: Price) -> String {
        let rounded = price
            .amount()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let negative = rounded < Decimal::ZERO;
        let digits = format!("{:.2}", rounded.abs());
        let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut out = String::with_capacity(digits.len() + integer.len() / 3 + 1);
        if negative {
            out.push('-');
        }
        let len = integer.len();
        for (i, ch) in integer.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(self.thousands_separator);
            }
            out.push(ch);
        }
        out.push(self.decimal_separator);
        out.push_str(fraction);
        out
    }

    /// Format with the currency symbol prefixed (`$20,00`).
    #[must_use]
    pub fn display(&self, price: Price) -> String {
        format!("{}{}", self.symbol, self.format(price))
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::ES_AR
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn price(cents: i64) -> Price {
        Price::from_cents(cents)
    }

    #[test]
    fn test_format_two_decimals() {
        assert_eq!(PriceFormat::ES_AR.format(price(2000)), "20,00");
        assert_eq!(PriceFormat::ES_AR.format(Price::new(Decimal::new(5, 1))), "0,50");
        assert_eq!(PriceFormat::ES_AR.format(Price::ZERO), "0,00");
    }

    #[test]
    fn test_format_groups_thousands() {
        assert_eq!(PriceFormat::ES_AR.format(price(123_456_789)), "1.234.567,89");
        assert_eq!(PriceFormat::EN_US.format(price(123_456_789)), "1,234,567.89");
        assert_eq!(PriceFormat::ES_AR.format(price(100_000)), "1.000,00");
        assert_eq!(PriceFormat::ES_AR.format(price(99_999)), "999,99");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(PriceFormat::ES_AR.format(Price::new(Decimal::new(12_345, 3))), "12,35");
        assert_eq!(PriceFormat::ES_AR.format(Price::new(Decimal::new(-12_345, 3))), "-12,35");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(PriceFormat::ES_AR.format(Price::new(Decimal::new(-1, 3))), "0,00");
    }

    #[test]
    fn test_display_prefixes_symbol() {
        assert_eq!(PriceFormat::ES_AR.display(price(2000)), "$20,00");
    }

    #[test]
    fn test_for_locale() {
        assert_eq!(PriceFormat::for_locale("es-AR").unwrap(), PriceFormat::ES_AR);
        assert_eq!(PriceFormat::for_locale("en_US").unwrap(), PriceFormat::EN_US);
        assert!(PriceFormat::for_locale("fr-FR").is_err());
    }

    #[test]
    fn test_times_and_sum() {
        let total: Price = [price(1000).times(2), price(250).times(3)].into_iter().sum();
        assert_eq!(total, price(2750));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&price(1050)).unwrap();
        assert_eq!(json, "10.5");

        let parsed: Price = serde_json::from_str("10.5").unwrap();
        assert_eq!(parsed, price(1050));

        let parsed: Price = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, price(1000));
    }
}
