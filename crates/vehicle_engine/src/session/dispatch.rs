//! Tool dispatch
//!
//! Reducer from input events to grid mutations and side effects. The pointer
//! button and the active tool are matched once per event and routed to one
//! handler; handlers never re-inspect the tool.
//!
//! | Input                  | Effect                                              |
//! |------------------------|-----------------------------------------------------|
//! | Primary, Paint/Erase   | Freehand stroke, one history entry per drag         |
//! | Primary, Square(Erase) | Rectangle from press to release, one history entry  |
//! | Primary, Edit Tile     | Open the tile editor                                |
//! | Primary, Pan           | Drag the view                                       |
//! | Middle, any tool       | Open the tile editor                                |
//! | Secondary, any tool    | Erase stroke                                        |
//! | Character key          | Select the palette character if bound               |
//! | Arrow key              | Pan one cell                                        |
//! | Scroll                 | Zoom anchored at the pointer                        |

use crate::events::{InputEvent, Key, PointerButton, SideEffect};
use crate::{HistoryAccumulator, Position, Rectangle, ScreenPoint, Tool, line_points, view::ZOOM_STEP};

use super::{DragOp, EditSession, StrokeMode};

impl EditSession {
    /// Feed one input event through the active tool
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<SideEffect> {
        match event {
            InputEvent::PointerDown { button, pos } => self.on_pointer_down(button, pos),
            InputEvent::PointerMove { pos } => self.on_pointer_move(pos),
            InputEvent::PointerUp { button, pos } => self.on_pointer_up(button, pos),
            InputEvent::Key(key) => self.on_key(key),
            InputEvent::Scroll { steps, pos } => {
                self.view.zoom_by(ZOOM_STEP.powf(steps), pos);
                vec![SideEffect::RedrawAll]
            }
        }
    }

    /// Close any open drag: strokes are committed, rectangle previews are
    /// dropped without writing anything.
    pub fn finish_drag(&mut self) -> Vec<SideEffect> {
        match std::mem::take(&mut self.tools.drag) {
            DragOp::Stroke { acc, .. } => self.commit_effects(acc, Vec::new()),
            DragOp::Rectangle { .. } => vec![SideEffect::PreviewRectangle(None)],
            DragOp::Pan { .. } | DragOp::None => Vec::new(),
        }
    }

    fn on_pointer_down(&mut self, button: PointerButton, pos: ScreenPoint) -> Vec<SideEffect> {
        if self.tools.drag.is_active() {
            return Vec::new();
        }
        let cell = self.view.screen_to_model(pos);

        match (button, self.tools.active_tool) {
            (PointerButton::Middle, _) | (PointerButton::Primary, Tool::EditTile) => vec![SideEffect::OpenTileEditor(cell)],
            (PointerButton::Secondary, _) | (PointerButton::Primary, Tool::Erase) => self.begin_stroke(button, StrokeMode::Erase, cell),
            (PointerButton::Primary, Tool::Paint) => match self.selected_template() {
                Ok(template) => self.begin_stroke(button, StrokeMode::Paint(template), cell),
                Err(err) => {
                    log::debug!("paint at {cell} ignored: {err}");
                    Vec::new()
                }
            },
            (PointerButton::Primary, Tool::Square) => match self.selected_template() {
                Ok(template) => self.begin_rectangle(button, StrokeMode::Paint(template), cell),
                Err(err) => {
                    log::debug!("square at {cell} ignored: {err}");
                    Vec::new()
                }
            },
            (PointerButton::Primary, Tool::SquareErase) => self.begin_rectangle(button, StrokeMode::Erase, cell),
            (PointerButton::Primary, Tool::Pan) => {
                self.tools.drag = DragOp::Pan { button, last: pos };
                Vec::new()
            }
        }
    }

    fn on_pointer_move(&mut self, pos: ScreenPoint) -> Vec<SideEffect> {
        let cell = self.view.screen_to_model(pos);

        match &mut self.tools.drag {
            DragOp::Stroke { mode, last_cell, acc, .. } => {
                if cell == *last_cell {
                    return Vec::new();
                }
                // every cell crossed since the last sample, so fast drags leave no gaps
                let changed: Vec<Position> = line_points(*last_cell, cell)
                    .into_iter()
                    .skip(1)
                    .filter(|p| mode.apply(&mut self.vehicle.grid, acc, *p))
                    .collect();
                *last_cell = cell;
                redraw(changed)
            }
            DragOp::Rectangle { anchor, current, .. } => {
                if cell == *current {
                    return Vec::new();
                }
                *current = cell;
                vec![SideEffect::PreviewRectangle(Some(Rectangle::from_corners(*anchor, cell)))]
            }
            DragOp::Pan { last, .. } => {
                self.view.pan_by(pos.x - last.x, pos.y - last.y);
                *last = pos;
                vec![SideEffect::RedrawAll]
            }
            DragOp::None => Vec::new(),
        }
    }

    fn on_pointer_up(&mut self, button: PointerButton, pos: ScreenPoint) -> Vec<SideEffect> {
        if self.tools.drag.button() != Some(button) {
            return Vec::new();
        }
        // the release position counts as a last move sample
        let mut effects = self.on_pointer_move(pos);
        let cell = self.view.screen_to_model(pos);

        match std::mem::take(&mut self.tools.drag) {
            DragOp::Stroke { acc, .. } => {
                effects.extend(self.commit_effects(acc, Vec::new()));
                effects
            }
            DragOp::Rectangle { mode, anchor, .. } => {
                let rect = Rectangle::from_corners(anchor, cell);
                let mut acc = HistoryAccumulator::new(mode.description(true));
                let changed: Vec<Position> = rect.positions().filter(|p| mode.apply(&mut self.vehicle.grid, &mut acc, *p)).collect();
                let mut effects = vec![SideEffect::PreviewRectangle(None)];
                effects.extend(self.commit_effects(acc, changed));
                effects
            }
            DragOp::Pan { .. } | DragOp::None => effects,
        }
    }

    fn on_key(&mut self, key: Key) -> Vec<SideEffect> {
        // arrows move the view over the vehicle, so the content shifts the other way
        let (dx, dy) = match key {
            Key::Char(ch) => {
                return if self.select_palette_char(ch) {
                    vec![SideEffect::PaletteCharSelected(ch)]
                } else {
                    Vec::new()
                };
            }
            Key::Up => (0, 1),
            Key::Down => (0, -1),
            Key::Left => (1, 0),
            Key::Right => (-1, 0),
        };
        self.view.pan_by_cells(dx, dy);
        vec![SideEffect::RedrawAll]
    }

    fn begin_stroke(&mut self, button: PointerButton, mode: StrokeMode, cell: Position) -> Vec<SideEffect> {
        let mut acc = HistoryAccumulator::new(mode.description(false));
        let changed = mode.apply(&mut self.vehicle.grid, &mut acc, cell);
        self.tools.drag = DragOp::Stroke {
            button,
            mode,
            last_cell: cell,
            acc,
        };
        if changed { redraw(vec![cell]) } else { Vec::new() }
    }

    fn begin_rectangle(&mut self, button: PointerButton, mode: StrokeMode, cell: Position) -> Vec<SideEffect> {
        self.tools.drag = DragOp::Rectangle {
            button,
            mode,
            anchor: cell,
            current: cell,
        };
        vec![SideEffect::PreviewRectangle(Some(Rectangle::from_corners(cell, cell)))]
    }

    /// Commit `acc`, redrawing `changed` (if any) and reporting history changes
    fn commit_effects(&mut self, acc: HistoryAccumulator, changed: Vec<Position>) -> Vec<SideEffect> {
        let mut effects = redraw(changed);
        if self.commit(acc.finish()) {
            effects.push(SideEffect::HistoryChanged);
        }
        effects
    }
}

fn redraw(cells: Vec<Position>) -> Vec<SideEffect> {
    if cells.is_empty() { Vec::new() } else { vec![SideEffect::Redraw(cells)] }
}
