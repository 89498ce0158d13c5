use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::amount::Amount;

/// Opaque handle returned by the process endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar date exactly as written on the receipt.
///
/// Only the `YYYY-MM-DD` shape is enforced, so `2022-13-99` is a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for PurchaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// 24-hour time of day, `00:00` through `23:59`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PurchaseTime {
    pub hour: u8,
    pub minute: u8,
}

impl PurchaseTime {
    pub fn minutes_since_midnight(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

impl fmt::Display for PurchaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub short_description: String,
    pub price: Amount,
}

/// Validated receipt. Only `validation::validate_receipt` produces these from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub retailer: String,
    #[serde(serialize_with = "display_string")]
    pub purchase_date: PurchaseDate,
    #[serde(serialize_with = "display_string")]
    pub purchase_time: PurchaseTime,
    pub items: Vec<Item>,
    pub total: Amount,
}

fn display_string<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}
