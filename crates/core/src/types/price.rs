//! Product price.
//!
//! Prices travel over the wire as plain JSON numbers and are stored exactly as
//! sent: `25` stays an integer, `25.0` stays a float, and magnitudes beyond
//! [`Decimal`]'s range are kept rather than rejected. Decimal arithmetic is
//! available through [`Price::amount`] whenever the number fits.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A product price in the shop's currency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Number);

impl Price {
    /// Create a price from a JSON number.
    #[must_use]
    pub const fn new(number: Number) -> Self {
        Self(number)
    }

    /// Create a price from a float. Returns `None` for NaN or infinity.
    #[must_use]
    pub fn from_f64(amount: f64) -> Option<Self> {
        Number::from_f64(amount).map(Self)
    }

    /// The number exactly as it was received.
    #[must_use]
    pub const fn as_number(&self) -> &Number {
        &self.0
    }

    /// The decimal amount, or `None` if the number is outside [`Decimal`]'s range.
    #[must_use]
    pub fn amount(&self) -> Option<Decimal> {
        let text = self.0.to_string();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.amount() {
            Some(amount) => write!(f, "{amount:.2}"),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<i64> for Price {
    fn from(amount: i64) -> Self {
        Self(Number::from(amount))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(Number::from(amount))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_integer_stays_integer() {
        let price: Price = serde_json::from_value(json!(25)).unwrap();
        assert_eq!(price, Price::from(25_i64));
        assert_eq!(serde_json::to_value(&price).unwrap(), json!(25));
        assert_eq!(price.amount(), Some(Decimal::new(25, 0)));
    }

    #[test]
    fn test_float_stays_float() {
        let price: Price = serde_json::from_value(json!(25.0)).unwrap();
        assert_eq!(price, Price::from_f64(25.0).unwrap());
        assert_eq!(serde_json::to_value(&price).unwrap(), json!(25.0));
        assert_ne!(price, Price::from(25_i64));
    }

    #[test]
    fn test_large_magnitude_is_kept() {
        let price: Price = serde_json::from_str("1e30").unwrap();
        assert_eq!(price.amount(), None);
        assert_eq!(serde_json::to_value(&price).unwrap(), json!(1e30));
    }

    #[test]
    fn test_negative_and_fractional() {
        let price: Price = serde_json::from_value(json!(-3)).unwrap();
        assert_eq!(price.amount(), Some(Decimal::new(-3, 0)));

        let price: Price = serde_json::from_value(json!(48.99)).unwrap();
        assert_eq!(price.amount(), Some(Decimal::new(4899, 2)));
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert!(serde_json::from_value::<Price>(json!(["25"])).is_err());
        assert!(serde_json::from_value::<Price>(json!("25")).is_err());
        assert!(serde_json::from_value::<Price>(json!(null)).is_err());
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Price::from_f64(f64::NAN).is_none());
        assert!(Price::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_f64(48.99).unwrap().to_string(), "48.99");
        assert_eq!(Price::from(65_i64).to_string(), "65.00");
        assert_eq!(Price::from_f64(1e30).unwrap().to_string(), "1e30");
    }
}
