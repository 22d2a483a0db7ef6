//! gridcore - ordering and selection engine for tabular row views.
//!
//! The crate covers two tightly coupled subsystems over a grid-owned row
//! set: the sort engine (per-column comparators, priority-ordered
//! multi-column stable sort) and the selection engine (toggle, shift-range,
//! key- and index-addressed, bulk and focus operations with batched or
//! per-row change notification).
//!
//! Rendering, event binding, virtualization and filtering are external
//! collaborators: the grid consumes their outputs (cell accessors, visible
//! orderings, selectability predicates, event sinks) and owns nothing else.

pub mod column;
pub mod events;
pub mod grid;
pub mod options;
pub mod row;
pub mod selection;
pub mod sort;
pub mod value;

pub use column::{Column, ColumnType, SortDirection, SortSpec};
pub use events::{EventSink, GridEvent, Modifiers, NullSink, SelectionEvent};
pub use grid::Grid;
pub use options::{GridOptions, RowPredicate};
pub use row::{Entity, Row, RowId};
pub use selection::Selection;
pub use sort::{CellAccessor, SortError, SortFn, SortFnCache};

pub mod prelude {
    pub use crate::column::{Column, ColumnType, SortDirection, SortSpec};
    pub use crate::events::{EventSink, GridEvent, Modifiers, NullSink, SelectionEvent};
    pub use crate::grid::Grid;
    pub use crate::options::{GridOptions, RowPredicate};
    pub use crate::row::{Entity, Row, RowId};
    pub use crate::selection::Selection;
    pub use crate::sort::{
        CellAccessor, SortCriterion, SortError, SortFn, SortFnCache, active_criteria,
        guess_sort_fn, priority_sort, sort_rows,
    };
    pub use crate::value::CellValue;
}

pub use value::CellValue;
