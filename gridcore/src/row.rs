//! Row wrapper and entity contract.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::value::CellValue;

/// Unique identifier for a row within the process.
///
/// Stable for the row's lifetime, across sorts and visibility changes.
/// Allocation restarts only with the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(usize);

impl RowId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row_{}", self.0)
    }
}

/// The opaque record a row wraps.
///
/// The grid never inspects entities beyond this contract: an optional
/// stable identity marker and field lookup for key-addressed selection.
/// Both methods default to "nothing", so plain data types can opt in
/// piecemeal.
pub trait Entity {
    /// Stable identity marker.
    ///
    /// Entities returning `None` are excluded from the entity-returning
    /// selection queries but still counted by the grid-row-returning ones.
    fn entity_id(&self) -> Option<String> {
        None
    }

    /// Field lookup for key-addressed selection.
    fn field(&self, _key: &str) -> Option<CellValue> {
        None
    }
}

/// JSON objects act as records: `"id"` is the identity marker and fields
/// resolve by key, scalars mapped onto native cell values.
impl Entity for serde_json::Value {
    fn entity_id(&self) -> Option<String> {
        self.get("id").and_then(|v| v.as_str()).map(str::to_owned)
    }

    fn field(&self, key: &str) -> Option<CellValue> {
        self.get(key).map(CellValue::from_json)
    }
}

/// One row of the grid: an entity plus its selection, focus and visibility
/// state.
///
/// `is_selected` and `is_focused` mutate only through the grid's selection
/// operations. `visible` and `enable_selection` are inputs owned by
/// external collaborators (filtering, per-row policy) and set through the
/// grid's row setters.
#[derive(Debug, Clone)]
pub struct Row<E> {
    id: RowId,
    /// The wrapped record.
    pub entity: E,
    pub(crate) is_selected: bool,
    pub(crate) is_focused: bool,
    pub(crate) visible: bool,
    pub(crate) enable_selection: bool,
}

impl<E> Row<E> {
    /// Wrap an entity in a fresh row. Rows start visible, selectable,
    /// unselected and unfocused.
    pub fn new(entity: E) -> Self {
        Self {
            id: RowId::new(),
            entity,
            is_selected: false,
            is_focused: false,
            visible: true,
            enable_selection: true,
        }
    }

    /// The row's stable identifier.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Whether the row is selected.
    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// Whether the row holds focus.
    pub fn is_focused(&self) -> bool {
        self.is_focused
    }

    /// Whether the external visibility collaborator considers the row
    /// visible.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Per-row selection override.
    pub fn selection_enabled(&self) -> bool {
        self.enable_selection
    }

    /// Row-scoped attribute lookup for key-addressed selection.
    ///
    /// Resolves the row's own state by name: `"isSelected"`, `"isFocused"`,
    /// `"visible"`, `"enableSelection"`. Unknown keys match nothing.
    pub fn attr(&self, key: &str) -> Option<CellValue> {
        match key {
            "isSelected" => Some(self.is_selected.into()),
            "isFocused" => Some(self.is_focused.into()),
            "visible" => Some(self.visible.into()),
            "enableSelection" => Some(self.enable_selection.into()),
            _ => None,
        }
    }
}
