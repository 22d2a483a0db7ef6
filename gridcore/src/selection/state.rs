//! Grid-scoped aggregate selection state.

use crate::row::{Row, RowId};

/// Aggregate selection state, one per grid.
///
/// `selected_count` is kept consistent with the per-row flags by funneling
/// every flag change through [`apply`](Self::apply); nothing else writes
/// `is_selected`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected_count: usize,
    select_all: bool,
    focused_row: Option<RowId>,
    last_selected: Option<RowId>,
}

impl Selection {
    /// Empty selection state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected rows. O(1).
    pub fn selected_count(&self) -> usize {
        self.selected_count
    }

    /// Whether the last bulk select-all is still in effect.
    pub fn select_all(&self) -> bool {
        self.select_all
    }

    /// The currently focused row, if any.
    pub fn focused_row(&self) -> Option<RowId> {
        self.focused_row
    }

    /// Anchor for shift-range selection: the most recently selected row.
    pub fn last_selected(&self) -> Option<RowId> {
        self.last_selected
    }

    /// The single update path for a row's selection flag.
    ///
    /// Returns whether the flag actually changed; the counter moves with
    /// it.
    pub(crate) fn apply<E>(&mut self, row: &mut Row<E>, selected: bool) -> bool {
        if row.is_selected == selected {
            return false;
        }
        row.is_selected = selected;
        if selected {
            self.selected_count += 1;
        } else {
            self.selected_count = self.selected_count.saturating_sub(1);
        }
        true
    }

    pub(crate) fn set_select_all(&mut self, select_all: bool) {
        self.select_all = select_all;
    }

    pub(crate) fn set_focused_row(&mut self, focused: Option<RowId>) {
        self.focused_row = focused;
    }

    pub(crate) fn set_last_selected(&mut self, last: Option<RowId>) {
        self.last_selected = last;
    }

    /// Whether the counter agrees with the per-row flags.
    pub fn is_consistent<E>(&self, rows: &[Row<E>]) -> bool {
        self.selected_count == rows.iter().filter(|row| row.is_selected).count()
    }
}
