//! Per-column comparator resolution and caching.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use crate::column::{Column, ColumnType};
use crate::sort::comparators;
use crate::value::CellValue;

/// A shareable comparator over cell values.
pub type SortFn = Arc<dyn Fn(&CellValue, &CellValue) -> Ordering + Send + Sync>;

/// Map a column type onto its comparator.
///
/// The table is exhaustive over the closed type enum; unrecognized
/// configuration tags are rejected earlier, when [`ColumnType`] parses
/// them.
pub fn guess_sort_fn(col_type: ColumnType) -> SortFn {
    match col_type {
        ColumnType::Number => Arc::new(comparators::sort_number),
        ColumnType::NumberStr => Arc::new(comparators::sort_number_str),
        ColumnType::Boolean => Arc::new(comparators::sort_bool),
        ColumnType::String => Arc::new(comparators::sort_alpha),
        ColumnType::Date => Arc::new(comparators::sort_date),
        ColumnType::Object => Arc::new(comparators::basic_sort),
    }
}

/// Comparator cache, one per grid instance, keyed by column name.
///
/// Deliberately coarse: entries are never invalidated automatically. A
/// caller that changes a column's type or comparator override at runtime
/// must [`evict`](Self::evict) the entry (or [`clear`](Self::clear) the
/// cache) itself.
#[derive(Default)]
pub struct SortFnCache {
    fns: HashMap<String, SortFn>,
}

impl SortFnCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the comparator for a column.
    ///
    /// Order: cache hit, explicit `sorting_algorithm` override (never
    /// re-guessed), display-filtered columns default to string comparison,
    /// then the type guess table.
    pub fn resolve(&mut self, column: &Column) -> SortFn {
        if let Some(cached) = self.fns.get(&column.name) {
            return Arc::clone(cached);
        }
        let sort_fn = if let Some(custom) = &column.sorting_algorithm {
            Arc::clone(custom)
        } else if column.sort_cell_filtered && column.cell_filter.is_some() {
            // Display-filtered values are strings by contract.
            Arc::new(comparators::sort_alpha) as SortFn
        } else {
            guess_sort_fn(column.col_type)
        };
        self.fns.insert(column.name.clone(), Arc::clone(&sort_fn));
        sort_fn
    }

    /// Drop one cached entry. Returns whether it existed.
    pub fn evict(&mut self, name: &str) -> bool {
        self.fns.remove(name).is_some()
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.fns.clear();
    }

    /// Number of cached comparators.
    pub fn len(&self) -> usize {
        self.fns.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.fns.is_empty()
    }
}

impl std::fmt::Debug for SortFnCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortFnCache")
            .field("columns", &self.fns.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_algorithm_wins_and_is_cached() {
        let column = Column::new("amount", ColumnType::Number)
            .sorting_algorithm(|_, _| Ordering::Less);
        let mut cache = SortFnCache::new();

        let resolved = cache.resolve(&column);
        assert_eq!(
            resolved(&CellValue::from(9), &CellValue::from(1)),
            Ordering::Less
        );

        // Cache is keyed by name: a differently-typed column with the same
        // name still gets the cached override.
        let retyped = Column::new("amount", ColumnType::String);
        let resolved = cache.resolve(&retyped);
        assert_eq!(
            resolved(&CellValue::from(9), &CellValue::from(1)),
            Ordering::Less
        );

        assert!(cache.evict("amount"));
        let resolved = cache.resolve(&retyped);
        assert_eq!(
            resolved(&CellValue::from("a"), &CellValue::from("b")),
            Ordering::Less
        );
    }

    #[test]
    fn cell_filtered_columns_compare_as_strings() {
        let column = Column::new("total", ColumnType::Number)
            .sort_cell_filtered()
            .cell_filter("currency");
        let mut cache = SortFnCache::new();
        let resolved = cache.resolve(&column);
        // "10" < "9" as strings
        assert_eq!(
            resolved(&CellValue::from("10"), &CellValue::from("9")),
            Ordering::Less
        );
    }

    #[test]
    fn sort_cell_filtered_without_filter_falls_through_to_guess() {
        let column = Column::new("total", ColumnType::Number).sort_cell_filtered();
        let mut cache = SortFnCache::new();
        let resolved = cache.resolve(&column);
        assert_eq!(
            resolved(&CellValue::from(10), &CellValue::from(9)),
            Ordering::Greater
        );
    }

    #[test]
    fn unknown_type_tag_is_a_configuration_error() {
        let err = "fancy".parse::<ColumnType>().unwrap_err();
        assert_eq!(
            err,
            crate::sort::SortError::UnknownColumnType("fancy".to_string())
        );
        assert_eq!("numberStr".parse::<ColumnType>(), Ok(ColumnType::NumberStr));
    }
}
