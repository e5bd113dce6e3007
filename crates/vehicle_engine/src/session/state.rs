//! Edit Session
//!
//! The canvas editing engine: owns the vehicle, the palette, the history, the
//! view and the tool state, and turns input events into reversible grid
//! mutations.
//!
//! # Architecture Overview
//!
//! The front end only reads from the session and feeds it events:
//! - [`EditSession::handle_event`] maps pointer/keyboard input through the
//!   active tool to grid mutations and returns side effects to render.
//! - Every mutation goes through the history; drags and square fills are
//!   committed as one entry each.
//! - The palette is independent of the vehicle and survives `new_vehicle` /
//!   `load_vehicle`, the history does not.
//!
//! # Module Organization
//!
//! - `state.rs` - Struct definition, lifecycle, getters, tool/palette selection
//! - `dispatch.rs` - Event reducer with one handler per tool
//! - `drag.rs` - In-progress drag operations
//! - `undo.rs` - History commits and the `UndoState` implementation
//! - `tile_edit.rs` - Tile editor collaborator
//! - `session_state.rs` - Serializable view/tool snapshot

use crate::{EngineError, GridModel, HistoryStack, Palette, Result, Tile, Tool, Vehicle, ViewTransform, tools};

use super::DragOp;

/// Tool dispatch state: which tool is active, what is painted, what is dragged
#[derive(Debug, Default)]
pub struct ToolState {
    pub active_tool: Tool,
    pub selected_char: Option<char>,
    pub(crate) drag: DragOp,
}

/// Main state container for vehicle editing
#[derive(Debug, Default)]
pub struct EditSession {
    pub(crate) vehicle: Vehicle,
    pub(crate) palette: Palette,
    pub(crate) history: HistoryStack,
    pub(crate) view: ViewTransform,
    pub(crate) tools: ToolState,
    pub(crate) is_dirty: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session editing `vehicle` with `palette`
    pub fn with_vehicle(vehicle: Vehicle, palette: Palette) -> Self {
        let mut session = Self::new();
        session.load_vehicle(vehicle);
        session.set_palette(palette);
        session
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Lifecycle
    // ═══════════════════════════════════════════════════════════════════════

    /// Start over with an empty vehicle. Clears the history, keeps the palette.
    pub fn new_vehicle(&mut self, name: impl Into<String>) {
        self.load_vehicle(Vehicle::new(name));
    }

    /// Replace the vehicle wholesale. Clears the history and any open drag,
    /// keeps the palette.
    pub fn load_vehicle(&mut self, vehicle: Vehicle) {
        log::info!("editing vehicle '{}' ({} tiles)", vehicle.id, vehicle.grid.len());
        self.vehicle = vehicle;
        self.history.clear();
        self.tools.drag = DragOp::None;
        self.is_dirty = false;
    }

    /// Replace the palette. The selected character survives if the new
    /// palette binds it.
    pub fn set_palette(&mut self, palette: Palette) {
        if let Some(ch) = self.tools.selected_char {
            if !palette.contains(ch) {
                self.tools.selected_char = None;
            }
        }
        self.palette = palette;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Id and name may be edited freely, grid edits must go through the session
    pub fn rename_vehicle(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.vehicle.id = id.into();
        self.vehicle.name = name.into();
        self.is_dirty = true;
    }

    pub fn grid(&self) -> &GridModel {
        &self.vehicle.grid
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette edits don't touch the grid and are not part of the history
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewTransform {
        &mut self.view
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn active_tool(&self) -> Tool {
        self.tools.active_tool
    }

    pub fn selected_char(&self) -> Option<char> {
        self.tools.selected_char
    }

    pub fn is_dragging(&self) -> bool {
        self.tools.drag.is_active()
    }

    pub fn is_dirty(&self) -> bool {
        self.is_dirty
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Tool & palette selection
    // ═══════════════════════════════════════════════════════════════════════

    /// Switch tools. An open drag is finished first.
    pub fn select_tool(&mut self, tool: Tool) {
        if tool != self.tools.active_tool {
            self.finish_drag();
            self.tools.active_tool = tool;
        }
    }

    /// Toolbar slot click: a slot holding the active tool toggles to its
    /// partner, any other slot selects its primary tool.
    pub fn click_tool_slot(&mut self, slot: usize) -> Tool {
        self.select_tool(tools::click_tool_slot(slot, self.tools.active_tool));
        self.tools.active_tool
    }

    /// Select `ch` for painting. Returns false (and changes nothing) when the
    /// palette doesn't bind it.
    pub fn select_palette_char(&mut self, ch: char) -> bool {
        if !self.palette.contains(ch) {
            return false;
        }
        self.tools.selected_char = Some(ch);
        true
    }

    pub fn clear_palette_selection(&mut self) {
        self.tools.selected_char = None;
    }

    /// Template of the selected palette character
    pub(crate) fn selected_template(&self) -> Result<Tile> {
        self.tools
            .selected_char
            .and_then(|ch| self.palette.lookup(ch))
            .cloned()
            .ok_or(EngineError::UnboundPaletteChar)
    }
}
