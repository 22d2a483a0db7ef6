//! CellValue enum for dynamic cell values

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A dynamic value that can hold any sortable cell type.
///
/// This enum represents every value the sort comparators and the key-based
/// selection operations can see. Cell accessors produce it, comparators
/// consume it.
///
/// # Type Mapping
///
/// | Column data | Variant |
/// |-------------|---------|
/// | null/missing | `Null` |
/// | Boolean | `Bool` |
/// | Integer | `Int` |
/// | Double | `Float` |
/// | Decimal | `Decimal` |
/// | String | `Text` |
/// | UniqueIdentifier | `Guid` |
/// | DateTime | `DateTime` |
/// | anything else | `Json` |
///
/// # Example
///
/// ```
/// use gridcore::CellValue;
///
/// let name = CellValue::from("Contoso");
/// let revenue = CellValue::from(1_000_000i64);
/// let active = CellValue::from(true);
/// let empty = CellValue::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit floating point.
    Float(f64),
    /// Arbitrary precision decimal.
    Decimal(Decimal),
    /// String value.
    Text(String),
    /// GUID/UUID value.
    Guid(Uuid),
    /// Date and time with timezone.
    DateTime(DateTime<Utc>),
    /// Fallback for structured or unrecognized values.
    Json(serde_json::Value),
}

impl CellValue {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Bool(_) => "bool",
            CellValue::Int(_) => "int",
            CellValue::Float(_) => "float",
            CellValue::Decimal(_) => "decimal",
            CellValue::Text(_) => "text",
            CellValue::Guid(_) => "guid",
            CellValue::DateTime(_) => "datetime",
            CellValue::Json(_) => "json",
        }
    }

    /// Numeric coercion. `Text` parses when it holds a plain number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Decimal(d) => d.to_f64(),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Truthiness coercion for boolean comparison.
    ///
    /// `Guid`, `DateTime` and `Json` values have no boolean meaning and
    /// return `None`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Int(i) => Some(*i != 0),
            CellValue::Float(f) => Some(*f != 0.0 && !f.is_nan()),
            CellValue::Decimal(d) => Some(!d.is_zero()),
            CellValue::Text(s) => Some(!s.is_empty()),
            _ => None,
        }
    }

    /// Canonical text rendering, used by the string comparator.
    ///
    /// `Null` renders empty; comparators never reach it because the null
    /// check runs first.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Decimal(d) => d.to_string(),
            CellValue::Text(s) => s.clone(),
            CellValue::Guid(g) => g.to_string(),
            CellValue::DateTime(dt) => dt.to_rfc3339(),
            CellValue::Json(v) => match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }

    /// Timestamp coercion in unix milliseconds.
    ///
    /// `DateTime` passes through; numeric values are taken as unix
    /// milliseconds; `Text` parses as RFC 3339, RFC 2822,
    /// `%Y-%m-%dT%H:%M:%S` or `%Y-%m-%d`.
    pub fn timestamp_millis(&self) -> Option<i64> {
        match self {
            CellValue::DateTime(dt) => Some(dt.timestamp_millis()),
            CellValue::Int(i) => Some(*i),
            CellValue::Float(f) => Some(*f as i64),
            CellValue::Decimal(d) => d.to_i64(),
            CellValue::Text(s) => parse_datetime_text(s),
            _ => None,
        }
    }

    /// Converts a JSON value, mapping scalars onto native variants.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else {
                    CellValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            serde_json::Value::String(s) => CellValue::Text(s.clone()),
            other => CellValue::Json(other.clone()),
        }
    }
}

fn parse_datetime_text(s: &str) -> Option<i64> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc().timestamp_millis());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().timestamp_millis());
    }
    None
}

// =============================================================================
// From implementations
// =============================================================================

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

impl From<i32> for CellValue {
    fn from(v: i32) -> Self {
        CellValue::Int(v.into())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<Decimal> for CellValue {
    fn from(v: Decimal) -> Self {
        CellValue::Decimal(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<Uuid> for CellValue {
    fn from(v: Uuid) -> Self {
        CellValue::Guid(v)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(v: DateTime<Utc>) -> Self {
        CellValue::DateTime(v)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(v: serde_json::Value) -> Self {
        CellValue::Json(v)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => CellValue::Null,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Null
    }
}
