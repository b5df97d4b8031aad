//! Receipt data models: the extracted field record and the money value.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ReciboError;

/// A currency-tagged monetary amount with two fraction digits.
///
/// Renders as `"CAD 45.67"` and serializes as that display string, which is
/// the wire format the extraction contract promises for `total_amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    /// Currency label, e.g. "CAD".
    pub currency: String,
    /// Decimal value; displayed with exactly two fraction digits.
    pub value: Decimal,
}

impl Money {
    pub fn new(currency: impl Into<String>, value: Decimal) -> Self {
        Self {
            currency: currency.into(),
            value,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency, self.value)
    }
}

impl FromStr for Money {
    type Err = ReciboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || ReciboError::Parse {
            field: "amount".to_string(),
            value: s.to_string(),
        };

        let (currency, number) = s.trim().split_once(' ').ok_or_else(parse_err)?;
        let value = Decimal::from_str(number.trim()).map_err(|_| parse_err())?;

        if currency.is_empty() {
            return Err(parse_err());
        }

        Ok(Self::new(currency, value))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// The extracted receipt record.
///
/// Each field is independently present or absent; a missing amount does not
/// invalidate a found date. Absent fields serialize as JSON `null` - callers
/// rely on all three keys being present in the output object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceiptFields {
    /// Canonical merchant name, or a fallback header line from the receipt.
    pub store_name: Option<String>,

    /// Grand total, normalized as `"CAD <n>.<2 digits>"`.
    pub total_amount: Option<Money>,

    /// Transaction date; format depends on the matched rule and the
    /// configured [`DateStyle`](crate::models::config::DateStyle).
    pub date: Option<String>,
}

impl ReceiptFields {
    /// Check whether any field was extracted.
    pub fn is_empty(&self) -> bool {
        self.store_name.is_none() && self.total_amount.is_none() && self.date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        let money = Money::new("CAD", Decimal::from_str("45.67").unwrap());
        assert_eq!(money.to_string(), "CAD 45.67");

        let money = Money::new("CAD", Decimal::from_str("1234.5").unwrap());
        assert_eq!(money.to_string(), "CAD 1234.50");
    }

    #[test]
    fn test_money_round_trip() {
        let money: Money = "CAD 45.67".parse().unwrap();
        assert_eq!(money.currency, "CAD");
        assert_eq!(money.value, Decimal::from_str("45.67").unwrap());
        assert_eq!(money.to_string(), "CAD 45.67");
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("45.67".parse::<Money>().is_err());
        assert!("CAD abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_fields_serialize_nulls() {
        let fields = ReceiptFields::default();
        let json = serde_json::to_value(&fields).unwrap();

        assert!(json.get("store_name").unwrap().is_null());
        assert!(json.get("total_amount").unwrap().is_null());
        assert!(json.get("date").unwrap().is_null());
    }

    #[test]
    fn test_fields_serialize_money_as_string() {
        let fields = ReceiptFields {
            store_name: Some("Costco".to_string()),
            total_amount: Some(Money::new("CAD", Decimal::from_str("45.67").unwrap())),
            date: Some("2024-01-15".to_string()),
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["total_amount"], "CAD 45.67");
        assert_eq!(json["store_name"], "Costco");
    }
}
