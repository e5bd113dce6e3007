use crate::{EngineError, GridModel, Position, Result};

pub const DEFAULT_VEHICLE_NAME: &str = "Custom Vehicle";

/// A vehicle being edited: identity plus its full grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub grid: GridModel,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self::new(DEFAULT_VEHICLE_NAME)
    }
}

impl Vehicle {
    /// Create an empty vehicle, deriving the id from the name
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id_from_name(&name),
            name,
            grid: GridModel::new(),
        }
    }

    pub fn with_grid(mut self, grid: GridModel) -> Self {
        self.grid = grid;
        self
    }

    /// Shift all tiles so the occupied area starts at (0, 0).
    ///
    /// Returns the applied offset. Fails without moving anything when the
    /// occupied area is too wide to fit in the coordinate range from (0, 0).
    pub fn normalize(&mut self) -> Result<Position> {
        let Some(bounds) = self.grid.occupied_bounds() else {
            return Ok(Position::default());
        };
        let offset = bounds.start.checked_neg().ok_or(EngineError::CoordinateOverflow {
            pos: bounds.start,
            offset: bounds.start,
        })?;
        self.grid.translate(offset)?;
        Ok(offset)
    }

    /// Outline of the vehicle, one string per row: `#` for occupied cells.
    pub fn blueprint(&self) -> Vec<String> {
        self.render_rows(|_| '#')
    }

    /// Render the occupied area row by row; empty cells become spaces
    pub fn render_rows(&self, mut cell: impl FnMut(Position) -> char) -> Vec<String> {
        let Some(bounds) = self.grid.occupied_bounds() else {
            return Vec::new();
        };
        (bounds.start.y..=bounds.end.y)
            .map(|y| {
                (bounds.start.x..=bounds.end.x)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if self.grid.contains(pos) { cell(pos) } else { ' ' }
                    })
                    .collect()
            })
            .collect()
    }
}

/// `"Custom Vehicle"` becomes `"custom_vehicle"`
pub fn id_from_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}
