use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// One sale as it appears in the source file.
///
/// Columns are matched by position: `product_name, quantity, unit_price, date`.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
pub struct SalesRecord {
    pub product_name: String,
    #[serde(deserialize_with = "parse_quantity")]
    pub quantity: u32,
    #[serde(deserialize_with = "parse_unit_price")]
    pub unit_price: Decimal,
    pub date: String,
}

impl SalesRecord {
    pub fn new(
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Decimal,
        date: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            unit_price,
            date: date.into(),
        }
    }

    /// `quantity * unit_price`, or `None` if it doesn't fit in a [`Decimal`].
    pub fn line_total(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.unit_price)
    }
}

fn parse_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    trimmed
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("invalid quantity {trimmed:?}")))
}

/// Accepts plain (`2.50`) and scientific (`2.5e0`) notation.
fn parse_unit_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let s: String = String::deserialize(deserializer)?;
    let trimmed = s.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| serde::de::Error::custom(format!("invalid unit price {trimmed:?}")))
}
