//! Tests for the edit session lifecycle, the tile editor collaborator and the
//! stored session state

use pretty_assertions::assert_eq;
use vehicle_engine::{
    EditSession, GridModel, ItemEntry, Palette, Position, Rotation, ScreenPoint, SessionState, Tile, TileEditor, Tool, UndoState, Vehicle,
};

fn create_session() -> EditSession {
    let mut palette = Palette::new("test");
    palette.add_entry('f', Tile::part("frame"), false).unwrap();
    palette.add_entry('w', Tile::part("wheel"), false).unwrap();
    EditSession::with_vehicle(Vehicle::new("Test"), palette)
}

/// Tile editor answering with a fixed result and remembering what it was shown
struct ScriptedEditor {
    answer: Option<Tile>,
    shown: Option<(Position, Option<Tile>, usize)>,
}

impl ScriptedEditor {
    fn answering(answer: Option<Tile>) -> Self {
        Self { answer, shown: None }
    }
}

impl TileEditor for ScriptedEditor {
    fn edit_tile(&mut self, pos: Position, current: Option<&Tile>, palette: &Palette) -> Option<Tile> {
        self.shown = Some((pos, current.cloned(), palette.len()));
        self.answer.clone()
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_load_vehicle_clears_history() {
    let mut session = create_session();
    session.select_palette_char('f');
    session.paint_at(Position::new(0, 0)).unwrap();
    session.undo().unwrap();
    session.paint_at(Position::new(1, 0)).unwrap();
    assert!(session.can_undo());

    let grid: GridModel = [(Position::new(4, 4), Tile::part("seat"))].into_iter().collect();
    session.load_vehicle(Vehicle::new("Other").with_grid(grid));

    assert!(!session.can_undo());
    assert!(!session.can_redo());
    assert!(!session.is_dirty());
    assert_eq!(session.vehicle().id, "other");
    assert_eq!(session.grid().len(), 1);
}

#[test]
fn test_palette_survives_new_vehicle() {
    let mut session = create_session();
    session.select_palette_char('w');
    session.paint_at(Position::new(0, 0)).unwrap();

    session.new_vehicle("Fresh");

    assert!(session.grid().is_empty());
    assert_eq!(session.palette().len(), 2);
    assert_eq!(session.selected_char(), Some('w'));
    assert_eq!(session.undo_stack_len(), 0);
}

#[test]
fn test_set_palette_drops_unbound_selection() {
    let mut session = create_session();
    session.select_palette_char('w');

    let mut palette = Palette::new("other");
    palette.add_entry('f', Tile::part("frame"), false).unwrap();
    session.set_palette(palette.clone());
    assert_eq!(session.selected_char(), None);

    session.select_palette_char('f');
    session.set_palette(palette);
    assert_eq!(session.selected_char(), Some('f'));
}

#[test]
fn test_paint_without_selection_fails() {
    let mut session = create_session();
    assert!(matches!(session.paint_at(Position::new(0, 0)), Err(vehicle_engine::EngineError::UnboundPaletteChar)));
    assert!(!session.select_palette_char('q'));
    assert_eq!(session.selected_char(), None);
}

#[test]
fn test_palette_edits_do_not_touch_history() {
    let mut session = create_session();
    session.palette_mut().add_entry('s', Tile::part("seat"), false).unwrap();
    assert_eq!(session.undo_stack_len(), 0);
    assert!(session.select_palette_char('s'));
}

#[test]
fn test_rename_vehicle_marks_dirty_without_history() {
    let mut session = create_session();
    session.select_palette_char('f');
    session.paint_at(Position::new(0, 0)).unwrap();
    session.mark_saved();

    session.rename_vehicle("big_cart", "Big Cart");

    assert_eq!(session.vehicle().id, "big_cart");
    assert_eq!(session.vehicle().name, "Big Cart");
    assert!(session.is_dirty());
    assert_eq!(session.undo_stack_len(), 1);
    assert_eq!(session.grid().len(), 1);
}

#[test]
fn test_tool_slots_toggle() {
    let mut session = create_session();
    assert_eq!(session.active_tool(), Tool::Paint);
    assert_eq!(session.click_tool_slot(0), Tool::Erase);
    assert_eq!(session.click_tool_slot(0), Tool::Paint);
    assert_eq!(session.click_tool_slot(1), Tool::Square);
    assert_eq!(session.click_tool_slot(1), Tool::SquareErase);
    assert_eq!(session.click_tool_slot(2), Tool::EditTile);
    assert_eq!(session.click_tool_slot(2), Tool::EditTile);
    assert_eq!(session.click_tool_slot(9), Tool::EditTile);
}

#[test]
fn test_switching_tool_commits_open_stroke() {
    use vehicle_engine::events::{InputEvent, PointerButton};

    let mut session = create_session();
    session.select_palette_char('f');
    let pos = session.view().model_to_screen(Position::new(0, 0));
    session.handle_event(InputEvent::PointerDown {
        button: PointerButton::Primary,
        pos,
    });
    session.select_tool(Tool::Pan);

    assert!(!session.is_dragging());
    assert_eq!(session.undo_stack_len(), 1);
    assert_eq!(session.grid().len(), 1);
}

// ============================================================================
// Tile editor
// ============================================================================

#[test]
fn test_tile_editor_result_is_one_entry() {
    let mut session = create_session();
    let edited = Tile::part("frame").with_item(ItemEntry::item("jack").with_chance(10));
    let mut editor = ScriptedEditor::answering(Some(edited.clone()));

    assert!(session.edit_tile_with(Position::new(2, 3), &mut editor));
    assert_eq!(editor.shown, Some((Position::new(2, 3), None, 2)));
    assert_eq!(session.grid().tile(Position::new(2, 3)), Some(&edited));
    assert_eq!(session.undo_description().as_deref(), Some("Edit tile"));

    session.undo().unwrap();
    assert!(session.grid().is_empty());
}

#[test]
fn test_tile_editor_cancel_changes_nothing() {
    let mut session = create_session();
    let mut editor = ScriptedEditor::answering(None);

    assert!(!session.edit_tile_with(Position::new(0, 0), &mut editor));
    assert!(editor.shown.is_some());
    assert_eq!(session.undo_stack_len(), 0);
}

#[test]
fn test_tile_editor_empty_result_clears_cell() {
    let mut session = create_session();
    session.select_palette_char('f');
    session.paint_at(Position::new(0, 0)).unwrap();

    let mut editor = ScriptedEditor::answering(Some(Tile::new()));
    assert!(session.edit_tile_with(Position::new(0, 0), &mut editor));
    assert_eq!(editor.shown.map(|(_, current, _)| current), Some(Some(Tile::part("frame"))));
    assert!(session.grid().is_empty());
}

// ============================================================================
// Session state
// ============================================================================

#[test]
fn test_session_state_round_trip() {
    let mut session = create_session();
    session.select_tool(Tool::Square);
    session.select_palette_char('w');
    session.view_mut().set_zoom(2.0);
    session.view_mut().set_rotation(Rotation::Deg180);
    session.view_mut().pan = ScreenPoint::new(12.0, -8.0);

    let state = session.session_state();
    let json = serde_json::to_string(&state).unwrap();

    let mut restored = create_session();
    restored.restore_session_state(&serde_json::from_str(&json).unwrap());

    assert_eq!(restored.session_state(), state);
    assert_eq!(restored.active_tool(), Tool::Square);
    assert_eq!(restored.selected_char(), Some('w'));
}

#[test]
fn test_session_state_defaults() {
    let state: SessionState = serde_json::from_str("{}").unwrap();
    assert_eq!(state, SessionState::default());

    let mut session = create_session();
    let stored = SessionState {
        zoom: 99.0,
        selected_char: Some('x'),
        ..Default::default()
    };
    session.restore_session_state(&stored);
    assert_eq!(session.view().zoom(), 4.0);
    assert_eq!(session.selected_char(), None);
}
