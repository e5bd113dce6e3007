//! Single tile edits coming from the tile editor collaborator, and direct
//! programmatic edits that bypass pointer dispatch.

use crate::{HistoryAccumulator, Palette, Position, Rectangle, Result, Tile};

use super::{EditSession, StrokeMode};

/// Dialog (or anything else) that edits the content of one tile
pub trait TileEditor {
    /// Edit `current` at `pos`. Returns the new content, `None` when the
    /// user cancelled. Returning an empty tile clears the cell.
    fn edit_tile(&mut self, pos: Position, current: Option<&Tile>, palette: &Palette) -> Option<Tile>;
}

impl EditSession {
    /// Replace the tile at `pos` as one history entry.
    ///
    /// Returns whether anything changed.
    pub fn apply_tile_edit(&mut self, pos: Position, content: Option<Tile>) -> bool {
        let mode = match content {
            Some(tile) if !tile.is_empty() => StrokeMode::Paint(tile),
            _ => StrokeMode::Erase,
        };
        let mut acc = HistoryAccumulator::new("Edit tile");
        mode.apply(&mut self.vehicle.grid, &mut acc, pos);
        self.commit(acc.finish())
    }

    /// Run `editor` on the tile at `pos` and commit its result
    pub fn edit_tile_with(&mut self, pos: Position, editor: &mut impl TileEditor) -> bool {
        match editor.edit_tile(pos, self.vehicle.grid.tile(pos), &self.palette) {
            Some(content) => self.apply_tile_edit(pos, Some(content)),
            None => {
                log::debug!("tile edit at {pos} cancelled");
                false
            }
        }
    }

    /// Paint the selected palette template at `pos`.
    ///
    /// # Errors
    ///
    /// [`crate::EngineError::UnboundPaletteChar`] when no character is selected.
    pub fn paint_at(&mut self, pos: Position) -> Result<bool> {
        let template = self.selected_template()?;
        Ok(self.apply_tile_edit(pos, Some(template)))
    }

    pub fn erase_at(&mut self, pos: Position) -> bool {
        self.apply_tile_edit(pos, None)
    }

    /// Fill (or clear with `None`) the inclusive rectangle as one history entry
    pub fn fill_rectangle(&mut self, rect: Rectangle, content: Option<Tile>) -> bool {
        let mode = match content {
            Some(tile) if !tile.is_empty() => StrokeMode::Paint(tile),
            _ => StrokeMode::Erase,
        };
        let mut acc = HistoryAccumulator::new(mode.description(true));
        for pos in rect.positions() {
            mode.apply(&mut self.vehicle.grid, &mut acc, pos);
        }
        self.commit(acc.finish())
    }
}
