use gridcore::prelude::*;
use serde_json::{Value, json};

#[derive(Default)]
struct RecordingSink {
    singles: Vec<(String, Option<GridEvent>)>,
    batches: Vec<(Vec<String>, Option<GridEvent>)>,
    focuses: Vec<(String, bool)>,
}

impl EventSink<Value> for RecordingSink {
    fn emit(&mut self, event: SelectionEvent<'_, Value>) {
        match event {
            SelectionEvent::RowSelectionChanged { row, evt } => {
                self.singles.push((entity_id(row), evt.copied()));
            }
            SelectionEvent::RowSelectionChangedBatch { rows, evt } => {
                self.batches
                    .push((rows.iter().map(|row| entity_id(row)).collect(), evt.copied()));
            }
            SelectionEvent::RowFocusChanged { row, .. } => {
                self.focuses.push((entity_id(row), row.is_focused()));
            }
        }
    }
}

fn entity_id(row: &Row<Value>) -> String {
    row.entity.entity_id().unwrap_or_default()
}

/// Ten rows; rows 5 and 7 invisible, rows 6 and 7 pre-selected.
fn scenario_grid(batch_events: bool) -> Grid<Value> {
    let options = GridOptions {
        enable_selection_batch_event: batch_events,
        ..Default::default()
    };
    let entities = (0..10)
        .map(|i| json!({"id": format!("id_{i}")}))
        .collect();
    let mut grid = Grid::with_rows(options, entities);
    for index in [6, 7] {
        let id = grid.row_id_at(index).unwrap();
        grid.toggle_row_selection(id, None, true, false, false, &mut NullSink);
    }
    for index in [5, 7] {
        let id = grid.row_id_at(index).unwrap();
        grid.set_row_visible(id, false);
    }
    grid
}

// ============================================================================
// Batch policy
// ============================================================================

#[test]
fn test_select_all_rows_emits_one_batch() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();

    grid.select_all_rows(None, &mut sink);
    assert!(sink.singles.is_empty());
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0].0.len(), 8, "two rows were already selected");
}

#[test]
fn test_select_all_rows_emits_singles_when_batching_is_off() {
    let mut grid = scenario_grid(false);
    let mut sink = RecordingSink::default();

    grid.select_all_rows(None, &mut sink);
    assert!(sink.batches.is_empty());
    assert_eq!(sink.singles.len(), 8, "two rows were already selected");
}

#[test]
fn test_select_all_rows_without_multiselect_emits_nothing() {
    let mut grid = scenario_grid(true);
    grid.set_multi_select(false);
    let mut sink = RecordingSink::default();

    grid.select_all_rows(None, &mut sink);
    assert!(sink.singles.is_empty());
    assert!(sink.batches.is_empty());
}

#[test]
fn test_select_all_visible_rows_emits_one_batch() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();

    grid.select_all_visible_rows(None, &mut sink);
    assert_eq!(sink.batches.len(), 1);
    // Eight visible rows, one of them already selected; invisible
    // selections are left alone.
    assert_eq!(sink.batches[0].0.len(), 7);
}

#[test]
fn test_select_all_visible_rows_emits_singles_when_batching_is_off() {
    let mut grid = scenario_grid(false);
    let mut sink = RecordingSink::default();

    grid.select_all_visible_rows(None, &mut sink);
    assert!(sink.batches.is_empty());
    assert_eq!(sink.singles.len(), 7);
}

#[test]
fn test_clear_selected_rows_emits_the_cleared_set() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();

    grid.clear_selected_rows(None, &mut sink);
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0].0, vec!["id_6", "id_7"]);

    // Nothing left to clear: no empty-set event.
    grid.clear_selected_rows(None, &mut sink);
    assert_eq!(sink.batches.len(), 1);
}

#[test]
fn test_clear_selected_rows_emits_singles_when_batching_is_off() {
    let mut grid = scenario_grid(false);
    let mut sink = RecordingSink::default();

    grid.clear_selected_rows(None, &mut sink);
    assert!(sink.batches.is_empty());
    assert_eq!(sink.singles.len(), 2);
}

// ============================================================================
// Toggle and shift notifications
// ============================================================================

#[test]
fn test_toggle_emits_one_batch_with_one_row() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();
    let id = grid.row_id_at(0).unwrap();

    grid.toggle_row_selection(id, None, true, false, false, &mut sink);
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0].0, vec!["id_0"]);
}

#[test]
fn test_non_multi_toggle_reports_net_changes_only() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();
    let id = grid.row_id_at(6).unwrap();

    // Row 6 is selected alongside row 7; a non-multi toggle collapses the
    // selection onto row 6, so only row 7 actually changed.
    grid.toggle_row_selection(id, None, false, false, false, &mut sink);
    assert!(grid.rows()[6].is_selected());
    assert!(!grid.rows()[7].is_selected());
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0].0, vec!["id_7"]);
}

#[test]
fn test_suppressed_toggle_emits_nothing() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();
    let id = grid.row_id_at(6).unwrap();

    grid.toggle_row_selection(id, None, true, true, false, &mut sink);
    assert!(grid.rows()[6].is_selected());
    assert!(sink.batches.is_empty());
    assert!(sink.singles.is_empty());
}

#[test]
fn test_shift_select_reports_rows_in_gesture_order() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();
    let anchor = grid.row_id_at(6).unwrap();
    let target = grid.row_id_at(3).unwrap();

    grid.clear_selected_rows(None, &mut NullSink);
    grid.toggle_row_selection(anchor, None, true, false, false, &mut NullSink);
    grid.shift_select(target, None, true, &mut sink);
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0].0, vec!["id_5", "id_4", "id_3"]);
}

// ============================================================================
// Event payload pass-through
// ============================================================================

#[test]
fn test_batch_event_carries_the_originating_event() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();
    let evt = GridEvent::new(Modifiers {
        shift: true,
        ..Modifiers::NONE
    });

    grid.clear_selected_rows(Some(&evt), &mut sink);
    assert_eq!(sink.batches[0].1, Some(evt));

    grid.select_all_rows(Some(&evt), &mut sink);
    assert_eq!(sink.batches[1].1, Some(evt));
}

#[test]
fn test_single_event_carries_the_originating_event() {
    let mut grid = scenario_grid(false);
    let mut sink = RecordingSink::default();
    let evt = GridEvent::new(Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    });
    let entity = grid.rows()[4].entity.clone();

    grid.select_row(&entity, Some(&evt), &mut sink);
    assert_eq!(sink.singles.len(), 1);
    assert_eq!(sink.singles[0], ("id_4".to_string(), Some(evt)));
}

// ============================================================================
// Focus notifications
// ============================================================================

#[test]
fn test_focus_changes_are_reported_per_row() {
    let mut grid = scenario_grid(true);
    let mut sink = RecordingSink::default();
    let first = grid.row_id_at(0).unwrap();
    let second = grid.row_id_at(1).unwrap();

    grid.set_focused(first, true, None, &mut sink);
    assert_eq!(sink.focuses, vec![("id_0".to_string(), true)]);

    grid.set_focused(second, true, None, &mut sink);
    assert_eq!(
        sink.focuses[1..],
        [("id_0".to_string(), false), ("id_1".to_string(), true)]
    );

    // Matching state: no notification.
    grid.set_focused(second, true, None, &mut sink);
    assert_eq!(sink.focuses.len(), 3);
}
