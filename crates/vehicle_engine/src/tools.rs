//! Tool definitions for vehicle painting
//!
//! Tools are organized in toggle pairs - clicking on an already-selected tool
//! switches to its partner (Paint ↔ Erase, Square ↔ Square Erase).

use serde::{Deserialize, Serialize};

/// Available canvas tools
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    // === Toggle Pair 1: Paint / Erase ===
    /// Paint the selected palette template, freehand
    #[default]
    Paint,
    /// Remove tiles, freehand
    Erase,

    // === Toggle Pair 2: Square / Square Erase ===
    /// Fill a rectangle with the selected palette template
    Square,
    /// Clear a rectangle
    SquareErase,

    // === Single Tools (no toggle partner) ===
    /// Open the tile editor for the clicked cell
    EditTile,
    /// Drag the view around
    Pan,
}

/// A toggle pair of tools sharing one toolbar slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolPair {
    pub primary: Tool,
    pub secondary: Tool,
}

impl ToolPair {
    pub const fn new(primary: Tool, secondary: Tool) -> Self {
        Self { primary, secondary }
    }

    pub const fn single(tool: Tool) -> Self {
        Self {
            primary: tool,
            secondary: tool,
        }
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.primary == tool || self.secondary == tool
    }

    /// Get the other tool in the pair
    pub fn toggle(&self, current: Tool) -> Tool {
        if current == self.primary { self.secondary } else { self.primary }
    }
}

/// Toolbar slots
pub const TOOL_SLOTS: [ToolPair; 4] = [
    ToolPair::new(Tool::Paint, Tool::Erase),
    ToolPair::new(Tool::Square, Tool::SquareErase),
    ToolPair::single(Tool::EditTile),
    ToolPair::single(Tool::Pan),
];

pub const ALL_TOOLS: [Tool; 6] = [Tool::Paint, Tool::Erase, Tool::Square, Tool::SquareErase, Tool::EditTile, Tool::Pan];

impl Tool {
    /// Stable identifier, also used in scripts and session files
    pub fn id(&self) -> &'static str {
        match self {
            Tool::Paint => "paint",
            Tool::Erase => "erase",
            Tool::Square => "square",
            Tool::SquareErase => "square_erase",
            Tool::EditTile => "edit_tile",
            Tool::Pan => "pan",
        }
    }

    /// Look up a tool by its [`Tool::id`] (case insensitive, `-` allowed for `_`)
    pub fn from_id(id: &str) -> Option<Tool> {
        let id = id.trim().to_lowercase().replace('-', "_");
        ALL_TOOLS.into_iter().find(|tool| tool.id() == id)
    }

    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Paint => "Paint",
            Tool::Erase => "Erase",
            Tool::Square => "Square",
            Tool::SquareErase => "Square Erase",
            Tool::EditTile => "Edit Tile",
            Tool::Pan => "Pan",
        }
    }

    /// Get the tooltip text
    pub fn tooltip(&self) -> &'static str {
        match self {
            Tool::Paint => "Paint the selected palette character (click again for Erase)",
            Tool::Erase => "Erase tiles (click again for Paint)",
            Tool::Square => "Fill a rectangle with the selected palette character (click again for Square Erase)",
            Tool::SquareErase => "Erase a rectangle (click again for Square)",
            Tool::EditTile => "Edit the parts and items of a single tile",
            Tool::Pan => "Drag to move the view",
        }
    }

    /// Toolbar keyboard shortcut (outside the canvas, where keys select palette characters)
    pub fn shortcut(&self) -> Option<char> {
        match self {
            Tool::Paint | Tool::Erase => Some('p'),
            Tool::Square | Tool::SquareErase => Some('s'),
            Tool::EditTile => Some('e'),
            Tool::Pan => Some('h'),
        }
    }
}

/// Handle clicking on a tool slot - returns the new tool
pub fn click_tool_slot(slot: usize, current_tool: Tool) -> Tool {
    let Some(pair) = TOOL_SLOTS.get(slot) else {
        return current_tool;
    };
    if pair.contains(current_tool) { pair.toggle(current_tool) } else { pair.primary }
}
