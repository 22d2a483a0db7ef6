//! The grid: row store, visible-row ordering, selection state, sort cache.

use log::debug;

use crate::column::Column;
use crate::options::GridOptions;
use crate::row::{Entity, Row, RowId};
use crate::selection::Selection;
use crate::sort::{CellAccessor, SortFnCache, sort_rows};

/// A grid instance: the owned row set plus the state both engines operate
/// on.
///
/// Rendering, filtering and event dispatch live outside; the grid receives
/// their results (visible ordering, selectability inputs, cell accessors,
/// event sinks) as data and collaborator parameters.
#[derive(Debug)]
pub struct Grid<E> {
    pub(crate) options: GridOptions<E>,
    pub(crate) rows: Vec<Row<E>>,
    pub(crate) visible_rows: Vec<RowId>,
    pub(crate) selection: Selection,
    sort_fns: SortFnCache,
}

impl<E: Entity> Grid<E> {
    /// An empty grid with the given options.
    pub fn new(options: GridOptions<E>) -> Self {
        Self {
            options,
            rows: Vec::new(),
            visible_rows: Vec::new(),
            selection: Selection::new(),
            sort_fns: SortFnCache::new(),
        }
    }

    /// A grid populated from entities.
    pub fn with_rows(options: GridOptions<E>, entities: Vec<E>) -> Self {
        let mut grid = Self::new(options);
        grid.set_rows(entities);
        grid
    }

    /// The grid options.
    pub fn options(&self) -> &GridOptions<E> {
        &self.options
    }

    /// Enable or disable multi-select.
    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.options.multi_select = multi_select;
    }

    /// Require modifier keys for multi-select gestures.
    pub fn set_modifier_keys_to_multi_select(&mut self, enabled: bool) {
        self.options.modifier_keys_to_multi_select = enabled;
    }

    // -------------------------------------------------------------------------
    // Row management
    // -------------------------------------------------------------------------

    /// Rebuild the row set from entities.
    ///
    /// Selection and focus state is not preserved; callers wanting to keep
    /// it must re-apply it afterwards.
    pub fn set_rows(&mut self, entities: Vec<E>) {
        debug!("rebuilding row set with {} entities", entities.len());
        self.rows = entities.into_iter().map(Row::new).collect();
        self.visible_rows = self.rows.iter().map(Row::id).collect();
        self.selection = Selection::new();
    }

    /// Append one entity as a new row. Returns its id.
    pub fn push_row(&mut self, entity: E) -> RowId {
        let row = Row::new(entity);
        let id = row.id();
        self.rows.push(row);
        self.visible_rows.push(id);
        id
    }

    /// All rows in their current order.
    pub fn rows(&self) -> &[Row<E>] {
        &self.rows
    }

    /// Look up a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row<E>> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// The id of the row at a position in the current ordering.
    pub fn row_id_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(Row::id)
    }

    /// Locate a row by entity identity.
    pub fn row_id_of(&self, entity: &E) -> Option<RowId>
    where
        E: PartialEq,
    {
        self.rows
            .iter()
            .find(|row| row.entity == *entity)
            .map(Row::id)
    }

    /// Set a row's visibility (input from the external filter collaborator).
    pub fn set_row_visible(&mut self, id: RowId, visible: bool) {
        if let Some(row) = self.row_mut(id) {
            row.visible = visible;
        }
    }

    /// Set a row's per-row selection override.
    pub fn set_row_selection_enabled(&mut self, id: RowId, enabled: bool) {
        if let Some(row) = self.row_mut(id) {
            row.enable_selection = enabled;
        }
    }

    /// Supply the ordered visible-row view computed outside the core.
    ///
    /// Drives shift-select ranges and the visible-index operations.
    pub fn set_visible_rows(&mut self, ids: Vec<RowId>) {
        self.visible_rows = ids;
    }

    /// The current visible-row ordering.
    pub fn visible_rows(&self) -> &[RowId] {
        &self.visible_rows
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Re-sort the owned rows by the columns' active criteria.
    ///
    /// A full re-sort on every call; invoke after any row-set or criteria
    /// mutation. With `use_external_sorting` set this is a pass-through
    /// and the current order stands.
    pub fn sort<A: CellAccessor<E>>(&mut self, accessor: &A, columns: &[Column]) {
        sort_rows(
            &self.options,
            &mut self.sort_fns,
            accessor,
            &mut self.rows,
            columns,
        );
    }

    /// The grid's comparator cache, for eviction when column configuration
    /// changes at runtime.
    pub fn sort_fns(&mut self) -> &mut SortFnCache {
        &mut self.sort_fns
    }

    // -------------------------------------------------------------------------
    // Selection queries
    // -------------------------------------------------------------------------

    /// Aggregate selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Number of selected rows. O(1).
    pub fn selected_count(&self) -> usize {
        self.selection.selected_count()
    }

    /// Whether the last bulk select-all is still in effect.
    pub fn select_all_state(&self) -> bool {
        self.selection.select_all()
    }

    /// The focused row, if any.
    pub fn focused_row(&self) -> Option<&Row<E>> {
        self.selection.focused_row().and_then(|id| self.row(id))
    }

    /// Selected entities carrying a stable identity marker.
    pub fn selected_rows(&self) -> Vec<&E> {
        self.rows
            .iter()
            .filter(|row| row.is_selected() && row.entity.entity_id().is_some())
            .map(|row| &row.entity)
            .collect()
    }

    /// Unselected entities carrying a stable identity marker.
    pub fn unselected_rows(&self) -> Vec<&E> {
        self.rows
            .iter()
            .filter(|row| !row.is_selected() && row.entity.entity_id().is_some())
            .map(|row| &row.entity)
            .collect()
    }

    /// Selected row wrappers, identity marker or not.
    pub fn selected_grid_rows(&self) -> Vec<&Row<E>> {
        self.rows.iter().filter(|row| row.is_selected()).collect()
    }

    /// Unselected row wrappers, identity marker or not.
    pub fn unselected_grid_rows(&self) -> Vec<&Row<E>> {
        self.rows.iter().filter(|row| !row.is_selected()).collect()
    }

    // -------------------------------------------------------------------------
    // Internals shared with the selection engine
    // -------------------------------------------------------------------------

    pub(crate) fn row_mut(&mut self, id: RowId) -> Option<&mut Row<E>> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    pub(crate) fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    pub(crate) fn row_selectable(&self, row: &Row<E>) -> bool {
        self.options.row_selectable(row)
    }
}
