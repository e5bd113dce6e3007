//! Input events fed into the editing session and the side effects it hands
//! back to the front end.
//!
//! The front end translates its toolkit's callbacks into [`InputEvent`]s and
//! renders the returned [`SideEffect`]s. Nothing in the engine knows which
//! toolkit sits on the other side.

use crate::{Position, Rectangle, ScreenPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button: drives the active tool
    Primary,
    /// Middle button: opens the tile editor with any tool
    Middle,
    /// Right button: erases with any tool
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character typed while the canvas has focus
    Char(char),
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { button: PointerButton, pos: ScreenPoint },
    PointerMove { pos: ScreenPoint },
    PointerUp { button: PointerButton, pos: ScreenPoint },
    Key(Key),
    /// Mouse wheel. Positive steps zoom in, anchored at `pos`.
    Scroll { steps: f32, pos: ScreenPoint },
}

/// What the front end has to do after an event
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SideEffect {
    /// These cells changed
    Redraw(Vec<Position>),
    /// The view moved, everything needs repainting
    RedrawAll,
    /// Rectangle outline to overlay while a square tool drags, `None` clears it
    PreviewRectangle(Option<Rectangle>),
    /// Ask the tile editor collaborator to edit this cell
    OpenTileEditor(Position),
    PaletteCharSelected(char),
    /// Undo/redo availability may have changed
    HistoryChanged,
}
