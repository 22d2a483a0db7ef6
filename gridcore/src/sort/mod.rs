//! Sort subsystem: comparators, per-column resolution, and the multi-column
//! stable sort engine.

pub mod comparators;
pub mod engine;
pub mod resolver;

use thiserror::Error;

pub use engine::{CellAccessor, SortCriterion, active_criteria, priority_sort, sort_rows};
pub use resolver::{SortFn, SortFnCache, guess_sort_fn};

/// Sort configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A column type tag that maps to no comparator.
    #[error("no sorting function found for type: {0}")]
    UnknownColumnType(String),
}
