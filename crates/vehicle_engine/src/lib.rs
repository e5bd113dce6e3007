//! Canvas editing engine for vehicle layouts
//!
//! GUI independent model layer of the vehicle painter:
//! - [`GridModel`] - sparse grid of [`Tile`]s
//! - [`Palette`] - character → tile template mapping, with auto generation
//! - [`ViewTransform`] - model ↔ screen mapping under zoom, rotation and pan
//! - [`EditSession`] - tool dispatch and undo/redo on top of the above
//! - [`document`] - the game's vehicle and palette JSON formats
//!
//! The front end feeds [`events::InputEvent`]s into the session and renders
//! the returned [`events::SideEffect`]s.

mod error;
pub use error::{EngineError, Result};

mod position;
pub use position::{Position, Rectangle, line_points};

mod tile;
pub use tile::{ItemEntry, ItemSource, Tile};

mod grid;
pub use grid::GridModel;

pub mod vehicle;
pub use vehicle::{DEFAULT_VEHICLE_NAME, Vehicle};

pub mod palette;
pub use palette::Palette;

pub mod view;
pub use view::{Rotation, ScreenPoint, ScreenSize, ViewTransform, model_to_screen, screen_to_model};

pub mod undo;
pub use undo::{HistoryAccumulator, HistoryEntry, HistoryStack, MAX_HISTORY_DEPTH, TileChange, UndoState};

pub mod tools;
pub use tools::Tool;

pub mod events;

pub mod session;
pub use session::{EditSession, SessionState, TileEditor};

pub mod document;
