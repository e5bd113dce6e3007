//! In-progress pointer drags

use crate::{GridModel, HistoryAccumulator, Position, ScreenPoint, Tile};
use crate::events::PointerButton;

/// What a stroke or rectangle writes into each cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StrokeMode {
    /// Write a copy of this template
    Paint(Tile),
    Erase,
}

impl StrokeMode {
    pub fn content(&self) -> Option<Tile> {
        match self {
            StrokeMode::Paint(template) => Some(template.clone()),
            StrokeMode::Erase => None,
        }
    }

    pub fn description(&self, rectangle: bool) -> &'static str {
        match (self, rectangle) {
            (StrokeMode::Paint(_), false) => "Paint",
            (StrokeMode::Erase, false) => "Erase",
            (StrokeMode::Paint(_), true) => "Fill square",
            (StrokeMode::Erase, true) => "Erase square",
        }
    }

    /// Write this mode's content into `pos`, recording the change.
    ///
    /// Returns false when the cell already holds that content; nothing is
    /// recorded then.
    pub(crate) fn apply(&self, grid: &mut GridModel, acc: &mut HistoryAccumulator, pos: Position) -> bool {
        let after = self.content();
        if grid.tile(pos) == after.as_ref() {
            return false;
        }
        let before = grid.set_tile(pos, after.clone());
        acc.record(pos, before, after);
        true
    }
}

/// Drag state of the canvas
#[derive(Debug, Default)]
pub enum DragOp {
    #[default]
    None,
    /// Freehand paint or erase, grouped into one history entry
    Stroke {
        button: PointerButton,
        mode: StrokeMode,
        last_cell: Position,
        acc: HistoryAccumulator,
    },
    /// Square / Square Erase: nothing is written until release
    Rectangle {
        button: PointerButton,
        mode: StrokeMode,
        anchor: Position,
        current: Position,
    },
    Pan {
        button: PointerButton,
        last: ScreenPoint,
    },
}

impl DragOp {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragOp::None)
    }

    pub fn button(&self) -> Option<PointerButton> {
        match self {
            DragOp::None => None,
            DragOp::Stroke { button, .. } | DragOp::Rectangle { button, .. } | DragOp::Pan { button, .. } => Some(*button),
        }
    }
}
