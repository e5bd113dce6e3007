//! Undo/Redo for the edit session
//!
//! An undo or redo requested while a drag is open first finishes that drag,
//! so the stroke in progress becomes its own entry before anything is
//! reverted. A square preview is dropped; [`EditSession::undo_with_effects`]
//! reports that as `PreviewRectangle(None)` together with the redraws.

use crate::{EngineError, HistoryEntry, Position, Result, UndoState, events::SideEffect};

use super::{DragOp, EditSession};

#[derive(Clone, Copy, PartialEq)]
enum Step {
    Undo,
    Redo,
}

impl EditSession {
    /// Commit a finished entry. Returns false for entries without changes.
    pub(crate) fn commit(&mut self, entry: HistoryEntry) -> bool {
        if self.history.commit(entry) {
            self.is_dirty = true;
            true
        } else {
            false
        }
    }

    /// Get undo stack length
    pub fn undo_stack_len(&self) -> usize {
        self.history.undo_len()
    }

    /// Get redo stack length
    pub fn redo_stack_len(&self) -> usize {
        self.history.redo_len()
    }

    /// Mark as saved (clears dirty flag)
    pub fn mark_saved(&mut self) {
        self.is_dirty = false;
    }

    /// Undo, returning everything a front end has to repaint: the closed
    /// drag's effects, the reverted cells and the history change.
    pub fn undo_with_effects(&mut self) -> Result<Vec<SideEffect>> {
        self.history_step(Step::Undo).map(|(_, effects)| effects)
    }

    /// Redo counterpart of [`EditSession::undo_with_effects`]
    pub fn redo_with_effects(&mut self) -> Result<Vec<SideEffect>> {
        self.history_step(Step::Redo).map(|(_, effects)| effects)
    }

    /// Fails without closing the drag when there is nothing to step over.
    /// An open stroke always counts, since finishing it may commit an entry.
    fn history_step(&mut self, step: Step) -> Result<(Vec<Position>, Vec<SideEffect>)> {
        let available = match step {
            Step::Undo => self.history.can_undo(),
            Step::Redo => self.history.can_redo(),
        };
        if !available && !matches!(self.tools.drag, DragOp::Stroke { .. }) {
            return Err(match step {
                Step::Undo => EngineError::nothing_to_undo(),
                Step::Redo => EngineError::nothing_to_redo(),
            });
        }

        let mut effects = self.finish_drag();
        let touched = match step {
            Step::Undo => self.history.undo(&mut self.vehicle.grid)?,
            Step::Redo => self.history.redo(&mut self.vehicle.grid)?,
        };
        self.is_dirty = true;

        if !touched.is_empty() {
            effects.push(SideEffect::Redraw(touched.clone()));
        }
        if !effects.contains(&SideEffect::HistoryChanged) {
            effects.push(SideEffect::HistoryChanged);
        }
        Ok((touched, effects))
    }
}

impl UndoState for EditSession {
    fn undo_description(&self) -> Option<String> {
        self.history.undo_description()
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn undo(&mut self) -> Result<Vec<Position>> {
        self.history_step(Step::Undo).map(|(touched, _)| touched)
    }

    fn redo_description(&self) -> Option<String> {
        self.history.redo_description()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn redo(&mut self) -> Result<Vec<Position>> {
        self.history_step(Step::Redo).map(|(touched, _)| touched)
    }
}
