//! Column configuration and per-column sort criteria.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::sort::{SortError, SortFn};
use crate::value::CellValue;

/// The semantic type of a column's cell data.
///
/// Drives comparator guessing when a column declares no explicit sorting
/// algorithm. Parsed from the configuration tags `"number"`, `"numberStr"`,
/// `"boolean"`, `"string"`, `"date"` and `"object"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    /// Plain numeric cells.
    Number,
    /// Numbers stored in strings, possibly with currency or grouping noise.
    NumberStr,
    /// Boolean cells; `false` sorts before `true`.
    Boolean,
    /// String cells, compared case-insensitively.
    String,
    /// Date cells, compared by timestamp.
    Date,
    /// Anything comparable by its natural ordering.
    Object,
}

impl ColumnType {
    /// The configuration tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Number => "number",
            ColumnType::NumberStr => "numberStr",
            ColumnType::Boolean => "boolean",
            ColumnType::String => "string",
            ColumnType::Date => "date",
            ColumnType::Object => "object",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(ColumnType::Number),
            "numberStr" => Ok(ColumnType::NumberStr),
            "boolean" => Ok(ColumnType::Boolean),
            "string" => Ok(ColumnType::String),
            "date" => Ok(ColumnType::Date),
            "object" => Ok(ColumnType::Object),
            other => Err(SortError::UnknownColumnType(other.to_string())),
        }
    }
}

impl TryFrom<&str> for ColumnType {
    type Error = SortError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One column's sort criterion: direction, multi-column priority, and an
/// ignore flag that suppresses the criterion without losing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortSpec {
    /// Sort direction; `None` means the column is not sorted.
    pub direction: Option<SortDirection>,
    /// Priority among multiple sorted columns, lower first. Criteria without
    /// a priority order after every criterion that has one.
    pub priority: Option<u32>,
    /// Suppresses this criterion while keeping it configured.
    pub ignore_sort: bool,
}

impl SortSpec {
    /// An ascending criterion.
    pub fn asc() -> Self {
        Self {
            direction: Some(SortDirection::Asc),
            ..Default::default()
        }
    }

    /// A descending criterion.
    pub fn desc() -> Self {
        Self {
            direction: Some(SortDirection::Desc),
            ..Default::default()
        }
    }

    /// Set the priority.
    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Mark the criterion ignored.
    pub fn ignored(mut self) -> Self {
        self.ignore_sort = true;
        self
    }

    /// Whether this criterion participates in sorting.
    pub fn is_active(&self) -> bool {
        self.direction.is_some() && !self.ignore_sort
    }
}

/// Column configuration.
///
/// Columns describe one sortable dimension of the grid: a stable name (the
/// comparator cache key), the cell data type, an optional explicit
/// comparator, and the explicit and fallback sort criteria.
///
/// # Examples
///
/// ```
/// use gridcore::{Column, ColumnType, SortSpec};
///
/// let columns = vec![
///     Column::new("name", ColumnType::String).sort(SortSpec::asc().priority(0)),
///     Column::new("revenue", ColumnType::NumberStr),
///     Column::new("created", ColumnType::Date).default_sort(SortSpec::desc()),
/// ];
/// ```
#[derive(Clone)]
pub struct Column {
    /// Stable column name; keys the comparator cache.
    pub name: String,
    /// Cell data type, used to guess a comparator.
    pub col_type: ColumnType,
    /// Explicit comparator override. Always wins over guessing and is never
    /// re-guessed once cached.
    pub sorting_algorithm: Option<SortFn>,
    /// Compare on the filtered/display value instead of the raw cell value.
    pub sort_cell_filtered: bool,
    /// Name of the display-value filter, when one is configured. Presence
    /// gates the `sort_cell_filtered` string-comparison rule.
    pub cell_filter: Option<String>,
    /// Explicit, user-driven sort criterion.
    pub sort: SortSpec,
    /// Fallback criterion used only when no explicit sort is set.
    pub default_sort: SortSpec,
}

impl Column {
    /// Create a new column.
    ///
    /// # Arguments
    /// * `name` - Stable column name
    /// * `col_type` - The cell data type
    pub fn new(name: impl Into<String>, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
            sorting_algorithm: None,
            sort_cell_filtered: false,
            cell_filter: None,
            sort: SortSpec::default(),
            default_sort: SortSpec::default(),
        }
    }

    /// Set an explicit comparator for this column.
    pub fn sorting_algorithm<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &CellValue) -> Ordering + Send + Sync + 'static,
    {
        self.sorting_algorithm = Some(Arc::new(f));
        self
    }

    /// Compare on the display value and default to string comparison.
    pub fn sort_cell_filtered(mut self) -> Self {
        self.sort_cell_filtered = true;
        self
    }

    /// Configure a display-value filter by name.
    pub fn cell_filter(mut self, name: impl Into<String>) -> Self {
        self.cell_filter = Some(name.into());
        self
    }

    /// Set the explicit sort criterion.
    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort = spec;
        self
    }

    /// Set the fallback sort criterion.
    pub fn default_sort(mut self, spec: SortSpec) -> Self {
        self.default_sort = spec;
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("col_type", &self.col_type)
            .field(
                "sorting_algorithm",
                &self.sorting_algorithm.as_ref().map(|_| "<fn>"),
            )
            .field("sort_cell_filtered", &self.sort_cell_filtered)
            .field("cell_filter", &self.cell_filter)
            .field("sort", &self.sort)
            .field("default_sort", &self.default_sort)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_type_tags_round_trip() {
        for col_type in [
            ColumnType::Number,
            ColumnType::NumberStr,
            ColumnType::Boolean,
            ColumnType::String,
            ColumnType::Date,
            ColumnType::Object,
        ] {
            assert_eq!(col_type.as_str().parse::<ColumnType>(), Ok(col_type));
        }
        assert!("datetime".parse::<ColumnType>().is_err());
    }

    #[test]
    fn sort_spec_activity() {
        assert!(SortSpec::asc().is_active());
        assert!(!SortSpec::asc().ignored().is_active());
        assert!(!SortSpec::default().is_active());
    }
}
