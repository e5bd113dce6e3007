use serde::{Deserialize, Serialize};

use crate::{EngineError, ItemEntry, ItemSource, Result};

/// `item_groups` may be written as one id or as a list
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GroupList {
    One(String),
    Many(Vec<String>),
}

impl GroupList {
    fn into_vec(self) -> Vec<String> {
        match self {
            GroupList::One(group) => vec![group],
            GroupList::Many(groups) => groups,
        }
    }
}

/// Item fields shared by vehicle placements and palette definitions
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_groups: Option<GroupList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chance: Option<i64>,
}

impl ItemFields {
    /// Validate and convert; `field` names this entry in error messages
    pub fn to_entry(&self, field: &str) -> Result<ItemEntry> {
        let source = match (&self.item, &self.item_groups) {
            (Some(item), groups) => {
                if groups.is_some() {
                    log::warn!("{field}: both 'item' and 'item_groups' given, using 'item'");
                }
                if item.is_empty() {
                    return Err(EngineError::malformed(format!("{field}.item"), "item id is empty"));
                }
                ItemSource::Item(item.clone())
            }
            (None, Some(groups)) => {
                let groups = groups.clone().into_vec();
                if groups.is_empty() || groups.iter().any(String::is_empty) {
                    return Err(EngineError::malformed(format!("{field}.item_groups"), "item group ids must not be empty"));
                }
                ItemSource::Groups(groups)
            }
            (None, None) => return Err(EngineError::malformed(field, "needs 'item' or 'item_groups'")),
        };

        let chance = match self.chance {
            None => None,
            Some(chance @ 1..=100) => Some(chance as u8),
            Some(chance) => {
                return Err(EngineError::malformed(
                    format!("{field}.chance"),
                    format!("chance must be between 1 and 100, got {chance}"),
                ));
            }
        };

        Ok(ItemEntry { source, chance })
    }

    pub fn from_entry(entry: &ItemEntry) -> Self {
        let (item, item_groups) = match &entry.source {
            ItemSource::Item(id) => (Some(id.clone()), None),
            ItemSource::Groups(groups) => (None, Some(GroupList::Many(groups.clone()))),
        };
        Self {
            item,
            item_groups,
            chance: entry.chance.map(i64::from),
        }
    }
}
