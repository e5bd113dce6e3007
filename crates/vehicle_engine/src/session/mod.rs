mod dispatch;
mod drag;
pub mod session_state;
mod state;
mod tile_edit;
mod undo;

pub use drag::{DragOp, StrokeMode};
pub use session_state::SessionState;
pub use state::{EditSession, ToolState};
pub use tile_edit::TileEditor;
