//! Tile content: what sits on a single grid cell
//!
//! The same type doubles as palette template, a tile is just content without
//! a coordinate.

/// Where an item entry spawns from
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemSource {
    /// A single item id
    Item(String),
    /// One or more item group ids
    Groups(Vec<String>),
}

/// An item or item group spawned on a tile
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemEntry {
    pub source: ItemSource,
    /// Spawn chance in percent (1-100). `None` means the game default.
    pub chance: Option<u8>,
}

impl ItemEntry {
    pub fn item(id: impl Into<String>) -> Self {
        Self {
            source: ItemSource::Item(id.into()),
            chance: None,
        }
    }

    pub fn groups<S: Into<String>>(groups: impl IntoIterator<Item = S>) -> Self {
        Self {
            source: ItemSource::Groups(groups.into_iter().map(Into::into).collect()),
            chance: None,
        }
    }

    pub fn with_chance(mut self, chance: u8) -> Self {
        self.chance = Some(chance);
        self
    }

    /// Short label, e.g. `Item: hammer` or `Groups: tools, food`
    pub fn describe(&self) -> String {
        let mut result = match &self.source {
            ItemSource::Item(id) => format!("Item: {id}"),
            ItemSource::Groups(groups) => format!("Groups: {}", groups.join(", ")),
        };
        if let Some(chance) = self.chance {
            result.push_str(&format!(" ({chance}%)"));
        }
        result
    }
}

/// Content of one grid cell
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Vehicle part ids, in mount order
    pub parts: Vec<String>,
    /// Fuel type shared by the tile's parts
    pub fuel: Option<String>,
    pub items: Vec<ItemEntry>,
}

impl Tile {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tile holding exactly one part
    pub fn part(id: impl Into<String>) -> Self {
        Self {
            parts: vec![id.into()],
            ..Default::default()
        }
    }

    /// A tile holding several parts
    pub fn parts<S: Into<String>>(ids: impl IntoIterator<Item = S>) -> Self {
        Self {
            parts: ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_fuel(mut self, fuel: impl Into<String>) -> Self {
        self.fuel = Some(fuel.into());
        self
    }

    pub fn with_item(mut self, item: ItemEntry) -> Self {
        self.items.push(item);
        self
    }

    /// A tile without parts and items is treated as absent, whatever its fuel
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty() && self.items.is_empty()
    }

    /// Human readable summary used for palette labels and tooltips
    pub fn describe(&self) -> String {
        let mut sections = Vec::new();

        if !self.parts.is_empty() {
            let mut desc = if self.parts.len() == 1 {
                format!("Part: {}", self.parts[0])
            } else {
                format!("Parts: {}", self.parts.join(", "))
            };
            if let Some(fuel) = &self.fuel {
                desc.push_str(&format!(" (fuel: {fuel})"));
            }
            sections.push(desc);
        }
        sections.extend(self.items.iter().map(ItemEntry::describe));

        if sections.is_empty() { "(empty)".to_string() } else { sections.join(" | ") }
    }
}
