//! Paint palette
//!
//! A palette binds single display characters to tile templates. Templates are
//! plain [`Tile`] values: whatever the user paints with a character is a copy
//! of its template.
//!
//! Palettes can be built by hand, loaded from a palette document or generated
//! from an existing grid. Generation hands out characters in a fixed priority
//! order, see [`candidate_chars`].

use std::collections::BTreeMap;

use crate::{EngineError, GridModel, Result, Tile};

pub const DEFAULT_PALETTE_ID: &str = "auto_generated";

/// Characters in the order auto generation assigns them:
/// lowercase letters, uppercase letters, digits, then ASCII symbols.
pub fn candidate_chars() -> impl Iterator<Item = char> {
    ('a'..='z')
        .chain('A'..='Z')
        .chain('0'..='9')
        .chain(('!'..='~').filter(|ch| !ch.is_ascii_alphanumeric()))
}

/// Whether `ch` may be bound in a palette
pub fn is_valid_palette_char(ch: char) -> bool {
    !ch.is_whitespace() && !ch.is_control()
}

/// Character → tile template mapping
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub id: String,
    entries: BTreeMap<char, Tile>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(DEFAULT_PALETTE_ID)
    }
}

impl Palette {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            entries: BTreeMap::new(),
        }
    }

    /// Bind `ch` to `template`.
    ///
    /// Fails with [`EngineError::DuplicateKey`] when `ch` is already bound and
    /// `overwrite` is false. Returns the replaced template otherwise.
    pub fn add_entry(&mut self, ch: char, template: Tile, overwrite: bool) -> Result<Option<Tile>> {
        if !is_valid_palette_char(ch) {
            return Err(EngineError::InvalidPaletteChar { ch });
        }
        if template.is_empty() {
            return Err(EngineError::EmptyTemplate { ch });
        }
        if !overwrite && self.entries.contains_key(&ch) {
            return Err(EngineError::DuplicateKey { ch });
        }
        Ok(self.entries.insert(ch, template))
    }

    pub fn remove_entry(&mut self, ch: char) -> Option<Tile> {
        self.entries.remove(&ch)
    }

    pub fn lookup(&self, ch: char) -> Option<&Tile> {
        self.entries.get(&ch)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.entries.contains_key(&ch)
    }

    /// Bound characters in code order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, &Tile)> {
        self.entries.iter().map(|(ch, tile)| (*ch, tile))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// First character bound to exactly this template
    pub fn find_template(&self, template: &Tile) -> Option<char> {
        self.entries.iter().find(|(_, t)| *t == template).map(|(ch, _)| *ch)
    }

    /// First unused character in auto generation order
    pub fn next_free_char(&self) -> Option<char> {
        next_free_char(&self.entries)
    }

    /// Generate a palette covering every tile of `grid`.
    ///
    /// Identical templates share one character. With `split_multi_part` a
    /// tile with N parts contributes N single-part templates instead of one
    /// combined template.
    pub fn auto_generate(grid: &GridModel, split_multi_part: bool) -> Result<Self> {
        let mut palette = Palette::default();
        palette.extend_from_grid(grid, split_multi_part)?;
        Ok(palette)
    }

    /// Add templates for every tile of `grid` not yet covered by this palette.
    ///
    /// Either every new template gets a character or the palette is left
    /// untouched and [`EngineError::PaletteExhausted`] is returned.
    /// Returns the number of added entries.
    pub fn extend_from_grid(&mut self, grid: &GridModel, split_multi_part: bool) -> Result<usize> {
        let mut staged = self.entries.clone();
        let mut added = 0;

        for (_, tile) in grid.iter() {
            let templates = if split_multi_part { split_tile(tile) } else { vec![tile.clone()] };
            for template in templates {
                if staged.values().any(|t| *t == template) {
                    continue;
                }
                let ch = next_free_char(&staged).ok_or(EngineError::PaletteExhausted)?;
                staged.insert(ch, template);
                added += 1;
            }
        }

        self.entries = staged;
        log::debug!("palette '{}': {added} entries generated, {} total", self.id, self.entries.len());
        Ok(added)
    }

    /// Label shown in palette lists, e.g. `a - Part: frame`
    pub fn describe(&self, ch: char) -> Option<String> {
        self.lookup(ch).map(|tile| format!("{ch} - {}", tile.describe()))
    }

    /// Entries whose label contains `query` (case insensitive).
    /// An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<(char, String)> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .map(|(ch, tile)| (*ch, format!("{ch} - {}", tile.describe())))
            .filter(|(_, label)| query.is_empty() || label.to_lowercase().contains(&query))
            .collect()
    }
}

fn next_free_char(entries: &BTreeMap<char, Tile>) -> Option<char> {
    candidate_chars().find(|ch| !entries.contains_key(ch))
}

/// One template per part (keeping the fuel) plus one for the items, if any
fn split_tile(tile: &Tile) -> Vec<Tile> {
    let mut templates: Vec<Tile> = tile
        .parts
        .iter()
        .map(|part| Tile {
            parts: vec![part.clone()],
            fuel: tile.fuel.clone(),
            items: Vec::new(),
        })
        .collect();
    if !tile.items.is_empty() {
        templates.push(Tile {
            items: tile.items.clone(),
            ..Default::default()
        });
    }
    templates
}
