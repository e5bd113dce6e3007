//! Vehicle document (game JSON)
//!
//! ```json
//! {
//!   "id": "cart",
//!   "type": "vehicle",
//!   "name": "Cart",
//!   "parts": [ { "x": 0, "y": 0, "part": "frame" }, { "x": 0, "y": 1, "parts": ["frame", "tank"], "fuel": "diesel" } ],
//!   "items": [ { "x": 0, "y": 0, "item_groups": ["tools"], "chance": 15 } ]
//! }
//! ```
//!
//! A file may hold a single vehicle object or an array of game objects; in
//! an array, everything that isn't a usable vehicle is skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DEFAULT_VEHICLE_NAME, EngineError, GridModel, Position, Result, Tile, Vehicle, vehicle::id_from_name};

use super::items::ItemFields;

pub const VEHICLE_TYPE: &str = "vehicle";
pub const EXPORT_COMMENT: &str = "exported with vehicle painter";

fn vehicle_type() -> String {
    VEHICLE_TYPE.to_string()
}

/// Entry of a `parts` list inside a placement: a bare id or `{ part, fuel? }`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartRef {
    Name(String),
    Detailed {
        part: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fuel: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartPlacement {
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<PartRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlacement {
    pub x: i32,
    pub y: i32,
    #[serde(flatten)]
    pub fields: ItemFields,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default = "vehicle_type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub parts: Vec<PartPlacement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ItemPlacement>,
    /// Outline rows, regenerated on export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<Value>,
    #[serde(rename = "//", default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl VehicleDocument {
    /// Validate and build the grid model. Nothing partial is ever returned.
    pub fn to_vehicle(&self) -> Result<Vehicle> {
        if self.kind != VEHICLE_TYPE {
            return Err(EngineError::malformed("type", format!("expected \"{VEHICLE_TYPE}\", got \"{}\"", self.kind)));
        }
        let name = self.name.clone().unwrap_or_else(|| DEFAULT_VEHICLE_NAME.to_string());
        let id = self.id.clone().unwrap_or_else(|| id_from_name(&name));

        let mut tiles: std::collections::BTreeMap<Position, Tile> = Default::default();

        for (i, placement) in self.parts.iter().enumerate() {
            let field = format!("parts[{i}]");
            let tile = tiles.entry(Position::new(placement.x, placement.y)).or_default();
            let mut fuels = vec![placement.fuel.clone()];

            match (&placement.part, &placement.parts) {
                (Some(part), _) => tile.parts.push(checked_part_id(part, &format!("{field}.part"))?),
                (None, Some(parts)) if !parts.is_empty() => {
                    for (j, part_ref) in parts.iter().enumerate() {
                        let part_field = format!("{field}.parts[{j}]");
                        match part_ref {
                            PartRef::Name(part) => tile.parts.push(checked_part_id(part, &part_field)?),
                            PartRef::Detailed { part, fuel } => {
                                tile.parts.push(checked_part_id(part, &part_field)?);
                                fuels.push(fuel.clone());
                            }
                        }
                    }
                }
                _ => return Err(EngineError::malformed(field, "needs 'part' or a non-empty 'parts' list")),
            }

            for fuel in fuels.into_iter().flatten() {
                match &tile.fuel {
                    None => tile.fuel = Some(fuel),
                    Some(existing) if *existing != fuel => {
                        log::warn!("{field}: fuel '{fuel}' conflicts with '{existing}' at ({}, {}), keeping '{existing}'", placement.x, placement.y);
                    }
                    Some(_) => {}
                }
            }
        }

        for (i, placement) in self.items.iter().enumerate() {
            let entry = placement.fields.to_entry(&format!("items[{i}]"))?;
            tiles.entry(Position::new(placement.x, placement.y)).or_default().items.push(entry);
        }

        let grid: GridModel = tiles.into_iter().collect();
        Ok(Vehicle { id, name, grid })
    }

    /// Document for `vehicle`: one placement per part and per item, plus a
    /// freshly generated blueprint.
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        let mut parts = Vec::new();
        let mut items = Vec::new();

        for (pos, tile) in vehicle.grid.iter() {
            for part in &tile.parts {
                parts.push(PartPlacement {
                    x: pos.x,
                    y: pos.y,
                    part: Some(part.clone()),
                    parts: None,
                    fuel: tile.fuel.clone(),
                });
            }
            for entry in &tile.items {
                items.push(ItemPlacement {
                    x: pos.x,
                    y: pos.y,
                    fields: ItemFields::from_entry(entry),
                });
            }
        }

        let blueprint = vehicle.blueprint();
        Self {
            id: Some(vehicle.id.clone()),
            kind: vehicle_type(),
            name: Some(vehicle.name.clone()),
            parts,
            items,
            blueprint: (!blueprint.is_empty()).then(|| Value::from(blueprint.into_iter().map(|row| vec![row]).collect::<Vec<_>>())),
            comment: Some(EXPORT_COMMENT.to_string()),
        }
    }

    /// Game style JSON: one placement per line
    pub fn to_json(&self) -> Result<String> {
        let mut lines = vec!["{".to_string()];
        let mut fields = Vec::new();

        if let Some(id) = &self.id {
            fields.push(format!("  \"id\": {}", serde_json::to_string(id)?));
        }
        fields.push(format!("  \"type\": {}", serde_json::to_string(&self.kind)?));
        if let Some(name) = &self.name {
            fields.push(format!("  \"name\": {}", serde_json::to_string(name)?));
        }
        fields.push(json_list("parts", self.parts.as_slice())?);
        if !self.items.is_empty() {
            fields.push(json_list("items", self.items.as_slice())?);
        }
        if let Some(Value::Array(rows)) = &self.blueprint {
            fields.push(json_list("blueprint", rows.as_slice())?);
        }
        if let Some(comment) = &self.comment {
            fields.push(format!("  \"//\": {}", serde_json::to_string(comment)?));
        }

        lines.push(fields.join(",\n"));
        lines.push("}".to_string());
        Ok(lines.join("\n"))
    }
}

fn json_list<T: Serialize>(key: &str, values: &[T]) -> Result<String> {
    if values.is_empty() {
        return Ok(format!("  \"{key}\": [ ]"));
    }
    let rows = values.iter().map(|v| serde_json::to_string(v).map(|s| format!("    {s}"))).collect::<serde_json::Result<Vec<_>>>()?;
    Ok(format!("  \"{key}\": [\n{}\n  ]", rows.join(",\n")))
}

fn checked_part_id(part: &str, field: &str) -> Result<String> {
    if part.is_empty() {
        return Err(EngineError::malformed(field, "part id is empty"));
    }
    Ok(part.to_string())
}

/// Parse a vehicle file: one vehicle object or an array of game objects.
///
/// A single object that fails validation is an error. In arrays, entries
/// that aren't vehicles or fail validation are skipped with a warning.
pub fn load_vehicles(json: &str) -> Result<Vec<Vehicle>> {
    let value: Value = serde_json::from_str(json)?;

    match value {
        Value::Object(_) => {
            let doc: VehicleDocument = serde_json::from_value(value).map_err(|err| EngineError::malformed("document", err.to_string()))?;
            Ok(vec![doc.to_vehicle()?])
        }
        Value::Array(entries) => {
            let mut vehicles = Vec::new();
            for (i, entry) in entries.into_iter().enumerate() {
                if !looks_like_vehicle(&entry) {
                    continue;
                }
                let result = serde_json::from_value::<VehicleDocument>(entry)
                    .map_err(|err| EngineError::malformed(format!("[{i}]"), err.to_string()))
                    .and_then(|doc| doc.to_vehicle());
                match result {
                    Ok(vehicle) => vehicles.push(vehicle),
                    Err(err) => log::warn!("skipping entry {i}: {err}"),
                }
            }
            Ok(vehicles)
        }
        _ => Err(EngineError::malformed("document", "expected a vehicle object or an array")),
    }
}

fn looks_like_vehicle(entry: &Value) -> bool {
    match entry.get("type").and_then(Value::as_str) {
        Some(kind) => kind == VEHICLE_TYPE,
        None => entry.get("parts").is_some() || entry.get("id").is_some(),
    }
}

/// Serialize `vehicle` in game style
pub fn vehicle_to_json(vehicle: &Vehicle) -> Result<String> {
    VehicleDocument::from_vehicle(vehicle).to_json()
}
