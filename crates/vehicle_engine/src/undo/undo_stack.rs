//! Bounded undo/redo stacks for grid edits

use std::collections::VecDeque;

use crate::{EngineError, GridModel, Position, Result};

use super::HistoryEntry;

/// Maximum number of entries kept on each stack
pub const MAX_HISTORY_DEPTH: usize = 50;

/// Trait for types that support undo/redo operations
pub trait UndoState {
    /// Get description of the next undo operation
    fn undo_description(&self) -> Option<String>;

    /// Check if undo is available
    fn can_undo(&self) -> bool;

    /// Undo the last entry, returning the touched cells.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyHistory`] when there is nothing to undo.
    fn undo(&mut self) -> Result<Vec<Position>>;

    /// Get description of the next redo operation
    fn redo_description(&self) -> Option<String>;

    /// Check if redo is available
    fn can_redo(&self) -> bool;

    /// Redo the last undone entry, returning the touched cells.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmptyHistory`] when there is nothing to redo.
    fn redo(&mut self) -> Result<Vec<Position>>;
}

/// Undo and redo stacks, each at most [`MAX_HISTORY_DEPTH`] deep
#[derive(Debug, Default)]
pub struct HistoryStack {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: VecDeque<HistoryEntry>,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a new entry. Clears the redo stack and evicts the oldest entry
    /// once the depth limit is exceeded. Empty entries are ignored.
    ///
    /// Returns whether the entry was recorded.
    pub fn commit(&mut self, entry: HistoryEntry) -> bool {
        if entry.is_empty() {
            return false;
        }
        log::debug!("commit '{}' ({} cells)", entry.description, entry.changes.len());
        self.redo_stack.clear();
        push_bounded(&mut self.undo_stack, entry);
        true
    }

    /// Revert the newest entry on `grid`
    pub fn undo(&mut self, grid: &mut GridModel) -> Result<Vec<Position>> {
        let entry = self.undo_stack.pop_back().ok_or_else(EngineError::nothing_to_undo)?;
        let touched = entry.apply_before(grid);
        push_bounded(&mut self.redo_stack, entry);
        Ok(touched)
    }

    /// Re-apply the newest undone entry on `grid`
    pub fn redo(&mut self, grid: &mut GridModel) -> Result<Vec<Position>> {
        let entry = self.redo_stack.pop_back().ok_or_else(EngineError::nothing_to_redo)?;
        let touched = entry.apply_after(grid);
        push_bounded(&mut self.undo_stack, entry);
        Ok(touched)
    }

    /// Get the number of undo entries
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo entries
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.back().map(|entry| entry.description.clone())
    }

    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.back().map(|entry| entry.description.clone())
    }

    /// Clear both stacks
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry) {
    stack.push_back(entry);
    while stack.len() > MAX_HISTORY_DEPTH {
        stack.pop_front();
    }
}
