use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::amount::Amount;
use super::domain::{Item, PurchaseDate, PurchaseTime, Receipt};

/// Top-level fields that must be present and non-empty, checked in this order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "retailer",
    "purchaseDate",
    "purchaseTime",
    "items",
    "total",
];

static RETAILER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9& ]+$").expect("retailer regex is valid"));

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("date regex is valid")
});

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("time regex is valid")
});

// Unicode White_Space without U+0085, plus U+FEFF. Keep in sync with
// `is_description_whitespace`.
const DESCRIPTION_WHITESPACE: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

// `\w` is the ASCII word class here.
static DESCRIPTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[A-Za-z0-9_\-{DESCRIPTION_WHITESPACE}]+$"))
        .expect("description regex is valid")
});

/// Whitespace a short description may contain, and that is trimmed before scoring.
pub(crate) fn is_description_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]{2}$").expect("amount regex is valid"));

/// First rule a raw receipt failed. Checks stop at the first failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field {field} is required.")]
    MissingField { field: &'static str },
    #[error("Invalid retailer format.")]
    InvalidRetailer,
    #[error("Invalid purchase date format. Expected YYYY-MM-DD.")]
    InvalidPurchaseDate,
    #[error("Invalid purchase time format. Expected HH:MM in 24-hour format.")]
    InvalidPurchaseTime,
    #[error("Items should be an array with at least one item.")]
    InvalidItems,
    #[error("Each item should have a shortDescription and price (items[{index}]).")]
    IncompleteItem { index: usize },
    #[error("Invalid shortDescription format in items[{index}].")]
    InvalidShortDescription { index: usize },
    #[error("Invalid price format in items[{index}]. Expected XX.XX.")]
    InvalidPrice { index: usize },
    #[error("Invalid total. Expected XX.XX.")]
    InvalidTotal,
}

impl ValidationError {
    /// JSON path of the offending field.
    pub fn field(&self) -> String {
        match self {
            ValidationError::MissingField { field } => (*field).to_string(),
            ValidationError::InvalidRetailer => "retailer".to_string(),
            ValidationError::InvalidPurchaseDate => "purchaseDate".to_string(),
            ValidationError::InvalidPurchaseTime => "purchaseTime".to_string(),
            ValidationError::InvalidItems => "items".to_string(),
            ValidationError::IncompleteItem { index } => format!("items[{index}]"),
            ValidationError::InvalidShortDescription { index } => {
                format!("items[{index}].shortDescription")
            }
            ValidationError::InvalidPrice { index } => format!("items[{index}].price"),
            ValidationError::InvalidTotal => "total".to_string(),
        }
    }

    /// Stable machine-readable name of the failed rule.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingField { .. } => "missing_field",
            ValidationError::InvalidRetailer => "invalid_retailer",
            ValidationError::InvalidPurchaseDate => "invalid_purchase_date",
            ValidationError::InvalidPurchaseTime => "invalid_purchase_time",
            ValidationError::InvalidItems => "invalid_items",
            ValidationError::IncompleteItem { .. } => "incomplete_item",
            ValidationError::InvalidShortDescription { .. } => "invalid_short_description",
            ValidationError::InvalidPrice { .. } => "invalid_price",
            ValidationError::InvalidTotal => "invalid_total",
        }
    }
}

/// Convert an untrusted JSON body into a `Receipt`.
pub fn validate_receipt(raw: &Value) -> Result<Receipt, ValidationError> {
    let fields = raw.as_object();
    for field in REQUIRED_FIELDS {
        let present = fields
            .and_then(|map| map.get(field))
            .is_some_and(is_truthy);
        if !present {
            return Err(ValidationError::MissingField { field });
        }
    }

    // Every required key is present past this point.
    let fields = fields.ok_or(ValidationError::MissingField { field: "retailer" })?;
    let field = |name: &'static str| {
        fields
            .get(name)
            .ok_or(ValidationError::MissingField { field: name })
    };

    let retailer = field("retailer")?
        .as_str()
        .filter(|value| RETAILER_PATTERN.is_match(value))
        .ok_or(ValidationError::InvalidRetailer)?;

    let purchase_date = field("purchaseDate")?
        .as_str()
        .and_then(parse_date)
        .ok_or(ValidationError::InvalidPurchaseDate)?;

    let purchase_time = field("purchaseTime")?
        .as_str()
        .and_then(parse_time)
        .ok_or(ValidationError::InvalidPurchaseTime)?;

    let raw_items = field("items")?
        .as_array()
        .filter(|items| !items.is_empty())
        .ok_or(ValidationError::InvalidItems)?;

    let items = raw_items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>, _>>()?;

    let total = field("total")?
        .as_str()
        .and_then(parse_amount)
        .ok_or(ValidationError::InvalidTotal)?;

    Ok(Receipt {
        retailer: retailer.to_string(),
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

fn validate_item(index: usize, raw: &Value) -> Result<Item, ValidationError> {
    let entry: &Map<String, Value> = raw
        .as_object()
        .ok_or(ValidationError::IncompleteItem { index })?;

    let (Some(description), Some(price)) = (entry.get("shortDescription"), entry.get("price"))
    else {
        return Err(ValidationError::IncompleteItem { index });
    };

    let short_description = description
        .as_str()
        .filter(|value| DESCRIPTION_PATTERN.is_match(value))
        .ok_or(ValidationError::InvalidShortDescription { index })?;

    let price = price
        .as_str()
        .and_then(parse_amount)
        .ok_or(ValidationError::InvalidPrice { index })?;

    Ok(Item {
        short_description: short_description.to_string(),
        price,
    })
}

fn parse_date(raw: &str) -> Option<PurchaseDate> {
    let captures = DATE_PATTERN.captures(raw)?;
    Some(PurchaseDate {
        year: captures[1].parse().ok()?,
        month: captures[2].parse().ok()?,
        day: captures[3].parse().ok()?,
    })
}

fn parse_time(raw: &str) -> Option<PurchaseTime> {
    let captures = TIME_PATTERN.captures(raw)?;
    Some(PurchaseTime {
        hour: captures[1].parse().ok()?,
        minute: captures[2].parse().ok()?,
    })
}

fn parse_amount(raw: &str) -> Option<Amount> {
    if !AMOUNT_PATTERN.is_match(raw) {
        return None;
    }
    Amount::parse_canonical(raw)
}

/// Absent-equivalent values: null, false, zero, empty string, empty array.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}
