//! Selection operations.
//!
//! Every mutating operation follows the same contract: gate ineligible
//! rows without aborting the rest, funnel flag changes through the
//! aggregate state's single update path, and emit notifications through
//! the sink only after all mutation is done.

use log::{debug, trace};

use crate::events::{EventSink, GridEvent, SelectionEvent};
use crate::grid::Grid;
use crate::row::{Entity, RowId};
use crate::value::CellValue;

/// Rows touched by one logical operation, in processing order.
///
/// A row that ends the operation in its starting state (cleared and then
/// re-selected by a non-multi toggle) nets out of the log.
#[derive(Debug, Default)]
struct ChangeLog {
    entries: Vec<(RowId, bool)>,
}

impl ChangeLog {
    fn record(&mut self, id: RowId, now: bool) {
        if let Some(pos) = self.entries.iter().position(|(entry, _)| *entry == id) {
            if self.entries[pos].1 == now {
                // Back to where it started.
                self.entries.remove(pos);
            }
        } else {
            self.entries.push((id, !now));
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }
}

impl<E: Entity> Grid<E> {
    /// Toggle one row's selection.
    ///
    /// No-op when the row fails the selectability gate, or when
    /// `visible_only` is set and the row is not visible. Without
    /// `multi_select`, selecting a row deselects every other row first;
    /// toggling a row that is selected among others re-selects it alone.
    /// `no_unselect` suppresses the unselect branch of an
    /// already-selected row. Any toggle invalidates the select-all state.
    pub fn toggle_row_selection<S: EventSink<E>>(
        &mut self,
        id: RowId,
        evt: Option<&GridEvent>,
        multi_select: bool,
        no_unselect: bool,
        visible_only: bool,
        sink: &mut S,
    ) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if !self.row_selectable(&self.rows[index]) {
            return;
        }
        if visible_only && !self.rows[index].visible() {
            return;
        }

        let mut selected = self.rows[index].is_selected();
        let mut changes = ChangeLog::default();

        if !multi_select {
            if !selected {
                self.clear_all_selected(&mut changes);
            } else if self.selection.selected_count() > 1 {
                // Re-select the row alone below.
                selected = false;
                self.clear_all_selected(&mut changes);
            }
        }

        if selected && no_unselect {
            trace!("toggle suppressed by no_unselect for {id}");
        } else {
            let target = !selected;
            if self.selection.apply(&mut self.rows[index], target) {
                changes.record(id, target);
            }
            if target {
                self.selection.set_last_selected(Some(id));
            }
            self.selection.set_select_all(false);
        }

        self.emit_changes(&changes, evt, sink);
    }

    /// Toggle driven by the grid options: multi-select intent resolved
    /// from the gesture's modifiers, `no_unselect` from configuration.
    pub fn toggle_row<S: EventSink<E>>(
        &mut self,
        id: RowId,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        let multi_select = self.options.effective_multi_select(evt);
        let no_unselect = self.options.no_unselect;
        self.toggle_row_selection(id, evt, multi_select, no_unselect, false, sink);
    }

    /// Select the visible range between the current anchor and `id`.
    ///
    /// No-op without `multi_select`. The anchor is the most recently
    /// selected row, or the first visible row when nothing is selected.
    /// The range is walked from anchor toward target, so a reverse gesture
    /// selects in reverse order; ineligible rows are skipped without
    /// breaking the range. Rows are selected, never toggled.
    pub fn shift_select<S: EventSink<E>>(
        &mut self,
        id: RowId,
        evt: Option<&GridEvent>,
        multi_select: bool,
        sink: &mut S,
    ) {
        if !multi_select {
            return;
        }
        let Some(target) = self.visible_rows.iter().position(|row| *row == id) else {
            return;
        };
        let anchor = if self.selection.selected_count() > 0 {
            self.selection
                .last_selected()
                .and_then(|last| self.visible_rows.iter().position(|row| *row == last))
                .unwrap_or(0)
        } else {
            0
        };

        let range: Vec<RowId> = if anchor <= target {
            self.visible_rows[anchor..=target].to_vec()
        } else {
            self.visible_rows[target..=anchor].iter().rev().copied().collect()
        };

        let mut changes = ChangeLog::default();
        for row_id in range {
            let Some(index) = self.index_of(row_id) else {
                continue;
            };
            if self.rows[index].is_selected() || !self.row_selectable(&self.rows[index]) {
                continue;
            }
            if self.selection.apply(&mut self.rows[index], true) {
                changes.record(row_id, true);
                self.selection.set_last_selected(Some(row_id));
            }
        }
        self.emit_changes(&changes, evt, sink);
    }

    /// Select a row located by entity identity. Idempotent.
    pub fn select_row<S: EventSink<E>>(&mut self, entity: &E, evt: Option<&GridEvent>, sink: &mut S)
    where
        E: PartialEq,
    {
        if let Some(id) = self.row_id_of(entity) {
            self.set_row_selected(id, true, evt, sink);
        }
    }

    /// Unselect a row located by entity identity. Idempotent.
    pub fn unselect_row<S: EventSink<E>>(
        &mut self,
        entity: &E,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) where
        E: PartialEq,
    {
        if let Some(id) = self.row_id_of(entity) {
            self.set_row_selected(id, false, evt, sink);
        }
    }

    /// Select every row whose entity field (or row attribute, when
    /// `use_entity_lookup` is false) equals `value`.
    pub fn select_row_by_key<S: EventSink<E>>(
        &mut self,
        use_entity_lookup: bool,
        key: &str,
        value: &CellValue,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        self.set_rows_by_key(use_entity_lookup, key, value, true, evt, sink);
    }

    /// Unselect every row whose entity field (or row attribute) equals
    /// `value`.
    pub fn unselect_row_by_key<S: EventSink<E>>(
        &mut self,
        use_entity_lookup: bool,
        key: &str,
        value: &CellValue,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        self.set_rows_by_key(use_entity_lookup, key, value, false, evt, sink);
    }

    /// Select every eligible row.
    ///
    /// No-op without `multi_select`. Ineligible rows are left untouched;
    /// select-all afterwards reflects "all eligible rows selected".
    pub fn select_all_rows<S: EventSink<E>>(&mut self, evt: Option<&GridEvent>, sink: &mut S) {
        if !self.options.multi_select {
            return;
        }
        let mut changes = ChangeLog::default();
        for index in 0..self.rows.len() {
            if self.rows[index].is_selected() || !self.row_selectable(&self.rows[index]) {
                continue;
            }
            let id = self.rows[index].id();
            if self.selection.apply(&mut self.rows[index], true) {
                changes.record(id, true);
            }
        }
        self.selection.set_select_all(true);
        debug!(
            "select all: {} rows now selected",
            self.selection.selected_count()
        );
        self.emit_changes(&changes, evt, sink);
    }

    /// Select every visible eligible row.
    ///
    /// No-op without `multi_select`. Non-visible rows keep whatever
    /// selection state they have.
    pub fn select_all_visible_rows<S: EventSink<E>>(
        &mut self,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        if !self.options.multi_select {
            return;
        }
        let mut changes = ChangeLog::default();
        for index in 0..self.rows.len() {
            if !self.rows[index].visible() {
                continue;
            }
            if self.rows[index].is_selected() || !self.row_selectable(&self.rows[index]) {
                continue;
            }
            let id = self.rows[index].id();
            if self.selection.apply(&mut self.rows[index], true) {
                changes.record(id, true);
            }
        }
        self.selection.set_select_all(true);
        self.emit_changes(&changes, evt, sink);
    }

    /// Unselect every row and drop the select-all state.
    ///
    /// No-op without `multi_select` (single selection clears through the
    /// toggle path).
    pub fn clear_selected_rows<S: EventSink<E>>(&mut self, evt: Option<&GridEvent>, sink: &mut S) {
        if !self.options.multi_select {
            return;
        }
        let mut changes = ChangeLog::default();
        self.clear_all_selected(&mut changes);
        self.selection.set_select_all(false);
        self.emit_changes(&changes, evt, sink);
    }

    /// Select the row at `index` in the visible ordering.
    pub fn select_row_by_visible_index<S: EventSink<E>>(
        &mut self,
        index: usize,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        if let Some(id) = self.visible_rows.get(index).copied() {
            self.set_row_selected(id, true, evt, sink);
        }
    }

    /// Unselect the row at `index` in the visible ordering.
    pub fn unselect_row_by_visible_index<S: EventSink<E>>(
        &mut self,
        index: usize,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        if let Some(id) = self.visible_rows.get(index).copied() {
            self.set_row_selected(id, false, evt, sink);
        }
    }

    /// Focus or unfocus a row.
    ///
    /// No-op when the row already has the requested focus state. Focusing
    /// moves focus off the previously focused row; unfocusing the focused
    /// row clears the aggregate. Emits a focus notification per changed
    /// row.
    pub fn set_focused<S: EventSink<E>>(
        &mut self,
        id: RowId,
        focused: bool,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.rows[index].is_focused() == focused {
            return;
        }

        let mut previous = None;
        if focused {
            if let Some(prev) = self.selection.focused_row()
                && prev != id
                && let Some(prev_index) = self.index_of(prev)
            {
                self.rows[prev_index].is_focused = false;
                previous = Some(prev_index);
            }
            self.rows[index].is_focused = true;
            self.selection.set_focused_row(Some(id));
        } else {
            self.rows[index].is_focused = false;
            if self.selection.focused_row() == Some(id) {
                self.selection.set_focused_row(None);
            }
        }

        if let Some(prev_index) = previous {
            sink.emit(SelectionEvent::RowFocusChanged {
                row: &self.rows[prev_index],
                evt,
            });
        }
        sink.emit(SelectionEvent::RowFocusChanged {
            row: &self.rows[index],
            evt,
        });
    }

    // -------------------------------------------------------------------------
    // Shared internals
    // -------------------------------------------------------------------------

    /// Gate-checked set/unset by row id; the common body of the
    /// entity-, key- and index-addressed operations.
    fn set_row_selected<S: EventSink<E>>(
        &mut self,
        id: RowId,
        selected: bool,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if !self.row_selectable(&self.rows[index]) {
            return;
        }
        let mut changes = ChangeLog::default();
        if self.selection.apply(&mut self.rows[index], selected) {
            changes.record(id, selected);
            if selected {
                self.selection.set_last_selected(Some(id));
            } else {
                self.selection.set_select_all(false);
            }
        }
        self.emit_changes(&changes, evt, sink);
    }

    fn set_rows_by_key<S: EventSink<E>>(
        &mut self,
        use_entity_lookup: bool,
        key: &str,
        value: &CellValue,
        selected: bool,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        let mut changes = ChangeLog::default();
        for index in 0..self.rows.len() {
            let row = &self.rows[index];
            let matched = if use_entity_lookup {
                row.entity.field(key).is_some_and(|field| field == *value)
            } else {
                row.attr(key).is_some_and(|attr| attr == *value)
            };
            if !matched || !self.row_selectable(row) {
                continue;
            }
            let id = row.id();
            if self.selection.apply(&mut self.rows[index], selected) {
                changes.record(id, selected);
                if selected {
                    self.selection.set_last_selected(Some(id));
                }
            }
        }
        if !selected && !changes.is_empty() {
            self.selection.set_select_all(false);
        }
        self.emit_changes(&changes, evt, sink);
    }

    /// Unselect every selected row. Callers own the select-all and event
    /// consequences.
    fn clear_all_selected(&mut self, changes: &mut ChangeLog) {
        for index in 0..self.rows.len() {
            if !self.rows[index].is_selected() {
                continue;
            }
            let id = self.rows[index].id();
            if self.selection.apply(&mut self.rows[index], false) {
                changes.record(id, false);
            }
        }
    }

    fn emit_changes<S: EventSink<E>>(
        &self,
        changes: &ChangeLog,
        evt: Option<&GridEvent>,
        sink: &mut S,
    ) {
        if changes.is_empty() {
            return;
        }
        debug_assert!(self.selection.is_consistent(&self.rows));
        if self.options.enable_selection_batch_event {
            let rows = changes.ids().filter_map(|id| self.row(id)).collect();
            sink.emit(SelectionEvent::RowSelectionChangedBatch { rows, evt });
        } else {
            for id in changes.ids() {
                if let Some(row) = self.row(id) {
                    sink.emit(SelectionEvent::RowSelectionChanged { row, evt });
                }
            }
        }
    }
}
