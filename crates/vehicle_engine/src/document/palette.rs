//! Palette document
//!
//! ```json
//! {
//!   "type": "palette",
//!   "id": "bus_palette",
//!   "vehicle_part": { "a": "frame", "b": { "part": "tank", "fuel": "diesel" }, "c": { "parts": ["frame", "seat"] } },
//!   "items": { "c": [ { "item_groups": ["tools"], "chance": 20 } ] }
//! }
//! ```
//!
//! A character present in both maps describes one template holding the parts
//! and the items.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{EngineError, Palette, Result, Tile, palette::is_valid_palette_char};

use super::items::ItemFields;

pub const PALETTE_TYPE: &str = "palette";
/// Older files written by the painter used this type
pub const LEGACY_PALETTE_TYPE: &str = "vehicle_palette";

fn palette_type() -> String {
    PALETTE_TYPE.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartDefinition {
    Name(String),
    Single {
        part: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fuel: Option<String>,
    },
    Multi {
        parts: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fuel: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemDefinitions {
    Many(Vec<ItemFields>),
    One(ItemFields),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteDocument {
    #[serde(rename = "type", default = "palette_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub vehicle_part: BTreeMap<String, PartDefinition>,
    #[serde(default)]
    pub items: BTreeMap<String, ItemDefinitions>,
}

impl PaletteDocument {
    /// Validate and build the palette. Nothing partial is ever returned.
    pub fn to_palette(&self) -> Result<Palette> {
        if self.kind != PALETTE_TYPE && self.kind != LEGACY_PALETTE_TYPE {
            return Err(EngineError::malformed("type", format!("expected \"{PALETTE_TYPE}\", got \"{}\"", self.kind)));
        }

        let mut templates: BTreeMap<char, Tile> = BTreeMap::new();

        for (key, definition) in &self.vehicle_part {
            let field = format!("vehicle_part.{key}");
            let tile = templates.entry(palette_key(key, &field)?).or_default();
            let (parts, fuel) = match definition {
                PartDefinition::Name(part) => (vec![part.clone()], None),
                PartDefinition::Single { part, fuel } => (vec![part.clone()], fuel.clone()),
                PartDefinition::Multi { parts, fuel } => (parts.clone(), fuel.clone()),
            };
            if parts.is_empty() || parts.iter().any(String::is_empty) {
                return Err(EngineError::malformed(field, "part ids must not be empty"));
            }
            tile.parts = parts;
            tile.fuel = fuel;
        }

        for (key, definitions) in &self.items {
            let field = format!("items.{key}");
            let tile = templates.entry(palette_key(key, &field)?).or_default();
            let definitions = match definitions {
                ItemDefinitions::Many(list) => list.as_slice(),
                ItemDefinitions::One(single) => std::slice::from_ref(single),
            };
            for (i, definition) in definitions.iter().enumerate() {
                tile.items.push(definition.to_entry(&format!("{field}[{i}]"))?);
            }
        }

        let mut palette = Palette::new(self.id.clone().unwrap_or_default());
        for (ch, template) in templates {
            palette.add_entry(ch, template, false).map_err(|err| EngineError::malformed(ch.to_string(), err.to_string()))?;
        }
        Ok(palette)
    }

    pub fn from_palette(palette: &Palette) -> Self {
        let mut vehicle_part = BTreeMap::new();
        let mut items = BTreeMap::new();

        for (ch, template) in palette.iter() {
            let key = ch.to_string();
            let definition = match (template.parts.as_slice(), &template.fuel) {
                ([], _) => None,
                ([part], None) => Some(PartDefinition::Name(part.clone())),
                ([part], Some(fuel)) => Some(PartDefinition::Single {
                    part: part.clone(),
                    fuel: Some(fuel.clone()),
                }),
                (parts, fuel) => Some(PartDefinition::Multi {
                    parts: parts.to_vec(),
                    fuel: fuel.clone(),
                }),
            };
            if let Some(definition) = definition {
                vehicle_part.insert(key.clone(), definition);
            }
            if !template.items.is_empty() {
                items.insert(key, ItemDefinitions::Many(template.items.iter().map(ItemFields::from_entry).collect()));
            }
        }

        Self {
            kind: palette_type(),
            id: Some(palette.id.clone()),
            vehicle_part,
            items,
        }
    }
}

fn palette_key(key: &str, field: &str) -> Result<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if is_valid_palette_char(ch) => Ok(ch),
        _ => Err(EngineError::malformed(field, "palette keys must be a single printable character")),
    }
}

pub fn load_palette(json: &str) -> Result<Palette> {
    let doc: PaletteDocument = serde_json::from_str(json).map_err(|err| match err.classify() {
        serde_json::error::Category::Data => EngineError::malformed("document", err.to_string()),
        _ => EngineError::Json(err),
    })?;
    doc.to_palette()
}

pub fn palette_to_json(palette: &Palette, pretty: bool) -> Result<String> {
    let doc = PaletteDocument::from_palette(palette);
    Ok(if pretty { serde_json::to_string_pretty(&doc)? } else { serde_json::to_string(&doc)? })
}
