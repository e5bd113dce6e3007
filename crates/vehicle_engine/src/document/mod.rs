//! Vehicle and palette documents
//!
//! Serde representations of the game's JSON formats plus their conversion to
//! and from the engine's grid model and palette. Conversion validates the
//! whole document first; on failure a [`crate::EngineError::MalformedDocument`]
//! names the offending field and nothing is applied.

mod items;
mod palette;
mod vehicle;

pub use items::{GroupList, ItemFields};
pub use palette::{ItemDefinitions, LEGACY_PALETTE_TYPE, PALETTE_TYPE, PartDefinition, PaletteDocument, load_palette, palette_to_json};
pub use vehicle::{EXPORT_COMMENT, ItemPlacement, PartPlacement, PartRef, VEHICLE_TYPE, VehicleDocument, load_vehicles, vehicle_to_json};
