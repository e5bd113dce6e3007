//! Undo/redo for grid edits
//!
//! Every grid mutation made through the editing session ends up here:
//! - Single-cell edits become one entry
//! - Drags and rectangle fills go through a [`HistoryAccumulator`] and are
//!   committed as one entry
//! - Entries store before/after tiles, so undo and redo never need to know
//!   which tool produced them

mod history_entry;
mod undo_stack;

pub use history_entry::{HistoryAccumulator, HistoryEntry, TileChange};
pub use undo_stack::{HistoryStack, MAX_HISTORY_DEPTH, UndoState};
