//! Comparison functions for the primitive cell types.
//!
//! Every comparator runs the shared null rule first: nulls rank after any
//! defined value, so they land at the bottom ascending and the top
//! descending once the engine applies direction afterwards.

use std::cmp::Ordering;

use crate::value::CellValue;

/// Shared null/undefined rule.
///
/// Returns the verdict when either side is null, `None` when the
/// comparator should proceed with real values. Zero and `false` are real
/// values and fall through.
pub fn handle_nulls(a: &CellValue, b: &CellValue) -> Option<Ordering> {
    if a.is_null() || b.is_null() {
        if a.is_null() && b.is_null() {
            return Some(Ordering::Equal);
        }
        if a.is_null() {
            return Some(Ordering::Greater);
        }
        return Some(Ordering::Less);
    }
    None
}

/// Generic comparison for values that share a natural ordering.
///
/// Same-variant values compare natively; numeric variants cross-compare
/// through `f64`; everything else compares by its text rendering.
pub fn basic_sort(a: &CellValue, b: &CellValue) -> Ordering {
    if let Some(ord) = handle_nulls(a, b) {
        return ord;
    }
    match (a, b) {
        (CellValue::Bool(x), CellValue::Bool(y)) => x.cmp(y),
        (CellValue::Int(x), CellValue::Int(y)) => x.cmp(y),
        (CellValue::Float(x), CellValue::Float(y)) => cmp_f64(*x, *y),
        (CellValue::Decimal(x), CellValue::Decimal(y)) => x.cmp(y),
        (CellValue::Text(x), CellValue::Text(y)) => x.cmp(y),
        (CellValue::Guid(x), CellValue::Guid(y)) => x.cmp(y),
        (CellValue::DateTime(x), CellValue::DateTime(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => cmp_f64(x, y),
            _ => a.to_text().cmp(&b.to_text()),
        },
    }
}

/// Numeric comparison. Sides that cannot coerce to a number are treated
/// null-like and pushed to the bottom.
pub fn sort_number(a: &CellValue, b: &CellValue) -> Ordering {
    if let Some(ord) = handle_nulls(a, b) {
        return ord;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => cmp_f64(x, y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Comparison of numbers stored in strings.
///
/// Strips currency symbols, grouping separators and other noise before
/// parsing. Values that still fail to parse are null-like and sort to the
/// bottom with the same both/one-sided tie-break as the null rule.
pub fn sort_number_str(a: &CellValue, b: &CellValue) -> Ordering {
    if let Some(ord) = handle_nulls(a, b) {
        return ord;
    }
    let num_a = parse_num_str(&a.to_text());
    let num_b = parse_num_str(&b.to_text());
    match (num_a, num_b) {
        (Some(x), Some(y)) => cmp_f64(x, y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Case-insensitive string comparison over the text rendering of both
/// sides. Exact lowercase match is a fast-path equal.
pub fn sort_alpha(a: &CellValue, b: &CellValue) -> Ordering {
    if let Some(ord) = handle_nulls(a, b) {
        return ord;
    }
    let str_a = a.to_text().to_lowercase();
    let str_b = b.to_text().to_lowercase();
    if str_a == str_b {
        return Ordering::Equal;
    }
    str_a.cmp(&str_b)
}

/// Date comparison by timestamp.
///
/// Date values pass through; strings parse (RFC 3339 and common layouts);
/// numeric values are unix milliseconds. Unparseable sides are null-like.
pub fn sort_date(a: &CellValue, b: &CellValue) -> Ordering {
    if let Some(ord) = handle_nulls(a, b) {
        return ord;
    }
    match (a.timestamp_millis(), b.timestamp_millis()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Boolean comparison; `true` is larger than `false`. Non-boolean sides
/// coerce through truthiness, null-like otherwise.
pub fn sort_bool(a: &CellValue, b: &CellValue) -> Ordering {
    if let Some(ord) = handle_nulls(a, b) {
        return ord;
    }
    match (a.as_bool(), b.as_bool()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Parse a numeric string, keeping `Infinity`/`-Infinity` tokens verbatim
/// and stripping every other character except digits, `.`, `e`, `E`, `-`.
fn parse_num_str(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed == "Infinity" {
        return Some(f64::INFINITY);
    }
    if trimmed == "-Infinity" {
        return Some(f64::NEG_INFINITY);
    }
    let stripped: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-'))
        .collect();
    stripped.parse::<f64>().ok()
}

fn cmp_f64(x: f64, y: f64) -> Ordering {
    x.partial_cmp(&y).unwrap_or(Ordering::Equal)
}
