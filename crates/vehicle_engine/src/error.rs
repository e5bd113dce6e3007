//! Unified error types for vehicle_engine

use thiserror::Error;

use crate::Position;

/// Main error type for editing engine operations
///
/// None of these are fatal. Every operation that returns an error leaves the
/// grid model and the history exactly as they were before the call.
#[derive(Debug, Error)]
pub enum EngineError {
    // === Palette Errors ===
    #[error("Palette character '{ch}' is already bound")]
    DuplicateKey { ch: char },

    #[error("'{ch:?}' can't be used as a palette character")]
    InvalidPaletteChar { ch: char },

    #[error("Palette template for '{ch}' has no parts and no items")]
    EmptyTemplate { ch: char },

    #[error("No unused palette characters left")]
    PaletteExhausted,

    #[error("No palette character selected")]
    UnboundPaletteChar,

    // === Grid Errors ===
    #[error("Moving {pos} by {offset} leaves the coordinate range")]
    CoordinateOverflow { pos: Position, offset: Position },

    // === History Errors ===
    #[error("Nothing to {action}")]
    EmptyHistory { action: &'static str },

    // === View Errors ===
    #[error("Rotation must be a multiple of 90 degrees, got {degrees}")]
    InvalidRotation { degrees: i32 },

    // === Document Errors ===
    #[error("Malformed document at '{field}': {message}")]
    MalformedDocument { field: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for vehicle_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

// === Convenience constructors ===
impl EngineError {
    /// Create a malformed document error for the given field path
    pub fn malformed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn nothing_to_undo() -> Self {
        Self::EmptyHistory { action: "undo" }
    }

    pub(crate) fn nothing_to_redo() -> Self {
        Self::EmptyHistory { action: "redo" }
    }
}
