//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are pounds sterling. The catalog file stores them as plain
//! JSON numbers (`"price": 89.99`). Serde goes through
//! `rust_decimal::serde::arbitrary_precision`, which writes the exact decimal
//! digits as the number token instead of rounding through `f64`.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
    /// The input is not a decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
}

/// A non-negative product price in pounds sterling.
///
/// Values constructed through [`Price::new`] or [`FromStr`] are validated.
/// Deserialization is lenient: whatever the catalog file holds is loaded
/// as-is, matching the "never crash on bad data" contract of the store.
///
/// ```
/// use rust_decimal::Decimal;
/// use stride_core::Price;
///
/// let price = Price::new(Decimal::new(123_450, 2)).unwrap();
/// assert_eq!(price.formatted(), "£1,234.50");
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::arbitrary_precision")] Decimal);

impl Price {
    /// Currency symbol used when rendering prices.
    pub const SYMBOL: &'static str = "£";

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display in en-GB currency style (e.g., "£1,234.50").
    #[must_use]
    pub fn formatted(&self) -> String {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{rounded:.2}");
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
        let (sign, digits) = whole
            .strip_prefix('-')
            .map_or(("", whole), |rest| ("-", rest));

        format!(
            "{sign}{}{}.{fraction}",
            Self::SYMBOL,
            group_thousands(digits)
        )
    }
}

/// Insert a comma between every group of three digits, counting from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.chars().count();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount =
            Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(format!("{s}: {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_negative() {
        assert!(matches!(
            Price::new(Decimal::new(-5, 1)),
            Err(PriceError::Negative(_))
        ));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_formatted_small_amounts() {
        assert_eq!("0".parse::<Price>().unwrap().formatted(), "£0.00");
        assert_eq!("7.5".parse::<Price>().unwrap().formatted(), "£7.50");
        assert_eq!("99.99".parse::<Price>().unwrap().formatted(), "£99.99");
    }

    #[test]
    fn test_formatted_groups_thousands() {
        assert_eq!("1000".parse::<Price>().unwrap().formatted(), "£1,000.00");
        assert_eq!(
            "1234567.891".parse::<Price>().unwrap().formatted(),
            "£1,234,567.89"
        );
    }

    #[test]
    fn test_formatted_rounds_half_away_from_zero() {
        assert_eq!("10.005".parse::<Price>().unwrap().formatted(), "£10.01");
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(matches!(
            "cheap".parse::<Price>(),
            Err(PriceError::Invalid(_))
        ));
    }

    #[test]
    fn test_serializes_as_json_number() {
        let price: Price = "49.99".parse().unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "49.99");

        let parsed: Price = serde_json::from_str("49.99").unwrap();
        assert_eq!(parsed, price);
    }

    #[test]
    fn test_json_keeps_every_digit() {
        let price: Price = "12345678901234.5678".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "12345678901234.5678");

        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.amount().to_string(), "12345678901234.5678");
    }
}
