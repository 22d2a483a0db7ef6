//! Grid-level configuration.

use std::fmt;
use std::sync::Arc;

use crate::events::GridEvent;
use crate::row::Row;

/// Predicate deciding whether a row may be selected.
pub type RowPredicate<E> = Arc<dyn Fn(&Row<E>) -> bool + Send + Sync>;

/// Grid configuration consumed by the sort and selection engines.
///
/// Owned by the caller conceptually; the grid holds a copy and exposes
/// setters for the options the selection API mutates at runtime.
#[derive(Clone)]
pub struct GridOptions<E> {
    /// Skip internal sorting entirely; the caller supplies pre-sorted rows.
    pub use_external_sorting: bool,
    /// Allow more than one selected row.
    pub multi_select: bool,
    /// Require ctrl/meta for multi-select gestures; plain clicks then act
    /// as single-select.
    pub modifier_keys_to_multi_select: bool,
    /// Default for the toggle operation's `no_unselect` parameter: an
    /// already-selected row stays selected when toggled.
    pub no_unselect: bool,
    /// Emit one batch notification per operation instead of one per row.
    pub enable_selection_batch_event: bool,
    /// External selectability predicate; `None` means every row passes.
    pub is_row_selectable: Option<RowPredicate<E>>,
}

impl<E> Default for GridOptions<E> {
    fn default() -> Self {
        Self {
            use_external_sorting: false,
            multi_select: true,
            modifier_keys_to_multi_select: false,
            no_unselect: false,
            enable_selection_batch_event: true,
            is_row_selectable: None,
        }
    }
}

impl<E> GridOptions<E> {
    /// Resolve the multi-select intent of a gesture.
    ///
    /// Multi-select must be enabled, and when modifier keys are required
    /// the gesture must carry ctrl or meta.
    pub fn effective_multi_select(&self, evt: Option<&GridEvent>) -> bool {
        if !self.multi_select {
            return false;
        }
        if !self.modifier_keys_to_multi_select {
            return true;
        }
        evt.is_some_and(|e| e.modifiers.ctrl || e.modifiers.meta)
    }

    /// Combined selectability gate: the per-row override and the external
    /// predicate.
    pub fn row_selectable(&self, row: &Row<E>) -> bool {
        row.selection_enabled()
            && self
                .is_row_selectable
                .as_ref()
                .is_none_or(|selectable| selectable(row))
    }
}

impl<E> fmt::Debug for GridOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridOptions")
            .field("use_external_sorting", &self.use_external_sorting)
            .field("multi_select", &self.multi_select)
            .field(
                "modifier_keys_to_multi_select",
                &self.modifier_keys_to_multi_select,
            )
            .field("no_unselect", &self.no_unselect)
            .field(
                "enable_selection_batch_event",
                &self.enable_selection_batch_event,
            )
            .field(
                "is_row_selectable",
                &self.is_row_selectable.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}
