//! Session state for the edit session
//!
//! Contains the view and tool settings a front end needs to restore an
//! editing session:
//! - Zoom, rotation and pan
//! - Selected tool
//! - Selected palette character

use serde::{Deserialize, Serialize};

use crate::{Rotation, ScreenPoint, Tool, view::clamp_zoom};

use super::EditSession;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Zoom level (1.0 = 100%)
    #[serde(default = "default_zoom")]
    pub zoom: f32,

    #[serde(default)]
    pub rotation: Rotation,

    /// Screen position of the model origin in pixels
    #[serde(default)]
    pub pan: ScreenPoint,

    #[serde(default)]
    pub selected_tool: Tool,

    #[serde(default)]
    pub selected_char: Option<char>,
}

fn default_version() -> u32 {
    1
}
fn default_zoom() -> f32 {
    1.0
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            version: 1,
            zoom: 1.0,
            rotation: Rotation::Deg0,
            pan: ScreenPoint::default(),
            selected_tool: Tool::Paint,
            selected_char: None,
        }
    }
}

impl EditSession {
    pub fn session_state(&self) -> SessionState {
        SessionState {
            version: default_version(),
            zoom: self.view.zoom(),
            rotation: self.view.rotation,
            pan: self.view.pan,
            selected_tool: self.tools.active_tool,
            selected_char: self.tools.selected_char,
        }
    }

    /// Apply a stored snapshot. A stored palette character the current
    /// palette doesn't bind is dropped.
    pub fn restore_session_state(&mut self, state: &SessionState) {
        self.view.set_zoom(clamp_zoom(state.zoom));
        self.view.rotation = state.rotation;
        self.view.pan = state.pan;
        self.select_tool(state.selected_tool);
        match state.selected_char {
            Some(ch) if self.select_palette_char(ch) => {}
            _ => self.clear_palette_selection(),
        }
    }
}
