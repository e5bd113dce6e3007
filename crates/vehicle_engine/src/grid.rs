//! Sparse grid model
//!
//! Maps cell coordinates to tile content. Only non-empty tiles are stored, so
//! the grid is unbounded in every direction and an empty cell costs nothing.

use std::collections::BTreeMap;

use crate::{EngineError, Position, Rectangle, Result, Tile};

/// Infinite sparse 2D grid of tiles
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridModel {
    tiles: BTreeMap<Position, Tile>,
}

impl GridModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace or remove the tile at `pos`.
    ///
    /// `None` and empty tiles both remove the cell. Returns the previous
    /// content so callers can build history entries.
    pub fn set_tile(&mut self, pos: Position, content: Option<Tile>) -> Option<Tile> {
        match content {
            Some(tile) if !tile.is_empty() => self.tiles.insert(pos, tile),
            _ => self.tiles.remove(&pos),
        }
    }

    /// Content at `pos`, `None` if the cell is absent
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        self.tiles.get(&pos)
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.tiles.contains_key(&pos)
    }

    /// Minimal inclusive rectangle containing every tile, `None` when empty
    pub fn occupied_bounds(&self) -> Option<Rectangle> {
        let mut iter = self.tiles.keys();
        let first = *iter.next()?;
        let mut bounds = Rectangle::from_corners(first, first);
        for pos in iter {
            bounds.include(*pos);
        }
        Some(bounds)
    }

    /// Tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> {
        self.tiles.iter().map(|(pos, tile)| (*pos, tile))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.tiles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Move every tile by `offset`. The grid is left untouched when any tile
    /// would leave the coordinate range.
    pub fn translate(&mut self, offset: Position) -> Result<()> {
        if offset == Position::default() {
            return Ok(());
        }
        let mut moved = BTreeMap::new();
        for (&pos, tile) in &self.tiles {
            let target = pos.checked_add(offset).ok_or(EngineError::CoordinateOverflow { pos, offset })?;
            moved.insert(target, tile.clone());
        }
        self.tiles = moved;
        Ok(())
    }
}

impl FromIterator<(Position, Tile)> for GridModel {
    fn from_iter<T: IntoIterator<Item = (Position, Tile)>>(iter: T) -> Self {
        let mut grid = GridModel::new();
        for (pos, tile) in iter {
            grid.set_tile(pos, Some(tile));
        }
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_previous() {
        let mut grid = GridModel::new();
        let pos = Position::new(-4, 7);
        assert_eq!(grid.set_tile(pos, Some(Tile::part("frame"))), None);
        assert_eq!(grid.set_tile(pos, Some(Tile::part("wheel"))), Some(Tile::part("frame")));
        assert_eq!(grid.tile(pos), Some(&Tile::part("wheel")));
        assert_eq!(grid.set_tile(pos, None), Some(Tile::part("wheel")));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_empty_tile_is_not_stored() {
        let mut grid = GridModel::new();
        grid.set_tile(Position::new(0, 0), Some(Tile::new().with_fuel("gasoline")));
        assert!(grid.is_empty());
        assert_eq!(grid.tile(Position::new(0, 0)), None);
    }

    #[test]
    fn test_occupied_bounds() {
        let mut grid = GridModel::new();
        assert_eq!(grid.occupied_bounds(), None);
        grid.set_tile(Position::new(3, -2), Some(Tile::part("frame")));
        grid.set_tile(Position::new(-1, 5), Some(Tile::part("frame")));
        grid.set_tile(Position::new(0, 0), Some(Tile::part("seat")));
        assert_eq!(grid.occupied_bounds(), Some(Rectangle::from_corners(Position::new(-1, -2), Position::new(3, 5))));
    }

    #[test]
    fn test_translate() {
        let mut grid: GridModel = [(Position::new(2, 3), Tile::part("frame"))].into_iter().collect();
        grid.translate(Position::new(-2, -3)).unwrap();
        assert_eq!(grid.tile(Position::new(0, 0)), Some(&Tile::part("frame")));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn test_translate_out_of_range_keeps_grid() {
        let mut grid: GridModel = [(Position::new(0, 0), Tile::part("frame")), (Position::new(i32::MAX - 1, 5), Tile::part("wheel"))]
            .into_iter()
            .collect();
        let before = grid.clone();

        assert!(matches!(
            grid.translate(Position::new(2, 0)),
            Err(EngineError::CoordinateOverflow { pos, .. }) if pos == Position::new(i32::MAX - 1, 5)
        ));
        assert_eq!(grid, before);
    }
}
