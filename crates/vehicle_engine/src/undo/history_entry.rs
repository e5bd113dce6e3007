use std::collections::HashMap;

use crate::{GridModel, Position, Tile};

/// Before/after content of one cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileChange {
    pub pos: Position,
    pub before: Option<Tile>,
    pub after: Option<Tile>,
}

impl TileChange {
    pub fn is_noop(&self) -> bool {
        self.before == self.after
    }
}

/// One undoable unit, possibly covering many cells
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub description: String,
    pub changes: Vec<TileChange>,
}

impl HistoryEntry {
    pub fn new(description: impl Into<String>, changes: Vec<TileChange>) -> Self {
        Self {
            description: description.into(),
            changes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn positions(&self) -> Vec<Position> {
        self.changes.iter().map(|change| change.pos).collect()
    }

    /// Restore every "before" value, last change first
    pub(crate) fn apply_before(&self, grid: &mut GridModel) -> Vec<Position> {
        for change in self.changes.iter().rev() {
            grid.set_tile(change.pos, change.before.clone());
        }
        self.positions()
    }

    /// Replay every "after" value
    pub(crate) fn apply_after(&self, grid: &mut GridModel) -> Vec<Position> {
        for change in &self.changes {
            grid.set_tile(change.pos, change.after.clone());
        }
        self.positions()
    }
}

/// Collects the changes of a multi-cell operation (a drag, a square fill)
/// into one history entry.
///
/// A cell touched several times keeps its first "before" and its last
/// "after", so it contributes only its net effect. Cells whose net effect is
/// nothing are dropped when the accumulator is finished.
#[derive(Debug, Default)]
pub struct HistoryAccumulator {
    description: String,
    changes: Vec<TileChange>,
    index: HashMap<Position, usize>,
}

impl HistoryAccumulator {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn record(&mut self, pos: Position, before: Option<Tile>, after: Option<Tile>) {
        if let Some(&i) = self.index.get(&pos) {
            self.changes[i].after = after;
            return;
        }
        if before == after {
            return;
        }
        self.index.insert(pos, self.changes.len());
        self.changes.push(TileChange { pos, before, after });
    }

    /// Whether the accumulated changes amount to anything
    pub fn is_empty(&self) -> bool {
        self.changes.iter().all(TileChange::is_noop)
    }

    pub fn finish(self) -> HistoryEntry {
        let changes = self.changes.into_iter().filter(|change| !change.is_noop()).collect();
        HistoryEntry::new(self.description, changes)
    }
}
