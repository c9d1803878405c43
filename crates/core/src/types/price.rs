//! Decimal product prices.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::forms::FormError;

/// A non-negative product price.
///
/// Stored as a decimal string (`"2.5"`) so no precision is lost between the
/// form, the store and the rendered table.
///
/// ```
/// use catalog_core::Price;
///
/// let price = Price::parse("2.5").unwrap();
/// assert_eq!(price.to_string(), "2.5");
/// assert!(Price::parse("abc").is_err());
/// assert!(Price::parse("-1").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::NegativePrice`] for amounts below zero.
    pub fn new(amount: Decimal) -> Result<Self, FormError> {
        if amount.is_zero() {
            // Drops the sign of `-0` but keeps the scale.
            return Ok(Self(amount.abs()));
        }
        if amount.is_sign_negative() {
            return Err(FormError::NegativePrice);
        }
        Ok(Self(amount))
    }

    /// Parse a price typed into a form field.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingPrice`] for blank input,
    /// [`FormError::InvalidPrice`] for non-numeric input and
    /// [`FormError::NegativePrice`] for amounts below zero.
    pub fn parse(raw: &str) -> Result<Self, FormError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FormError::MissingPrice);
        }
        let amount =
            Decimal::from_str(raw).map_err(|_| FormError::InvalidPrice(raw.to_owned()))?;
        Self::new(amount)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_written_scale() {
        assert_eq!(Price::parse("2.5").unwrap().to_string(), "2.5");
        assert_eq!(Price::parse(" 10 ").unwrap().to_string(), "10");
        assert_eq!(Price::parse("0").unwrap(), Price::default());
    }

    #[test]
    fn test_negative_zero_is_plain_zero() {
        assert_eq!(Price::parse("-0").unwrap().to_string(), "0");
        assert_eq!(Price::parse("-0.00").unwrap().to_string(), "0.00");
        assert!(!Price::parse("-0").unwrap().amount().is_sign_negative());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(Price::parse(""), Err(FormError::MissingPrice)));
        assert!(matches!(
            Price::parse("two"),
            Err(FormError::InvalidPrice(_))
        ));
        assert!(matches!(Price::parse("-0.01"), Err(FormError::NegativePrice)));
    }

    #[test]
    fn test_serializes_as_string() {
        let price = Price::parse("2.5").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"2.5\"");
        let back: Price = serde_json::from_str("\"2.5\"").unwrap();
        assert_eq!(back, price);
    }
}
