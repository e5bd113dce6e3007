//! Tests for palette building and auto generation

use pretty_assertions::assert_eq;
use vehicle_engine::{EngineError, GridModel, ItemEntry, Palette, Position, Tile, palette::candidate_chars};

fn grid_of(tiles: &[(i32, i32, Tile)]) -> GridModel {
    tiles.iter().map(|(x, y, tile)| (Position::new(*x, *y), tile.clone())).collect()
}

// ============================================================================
// Entries
// ============================================================================

#[test]
fn test_duplicate_key() {
    let mut palette = Palette::new("test");
    palette.add_entry('a', Tile::part("frame"), false).unwrap();

    let result = palette.add_entry('a', Tile::part("wheel"), false);
    assert!(matches!(result, Err(EngineError::DuplicateKey { ch: 'a' })));
    assert_eq!(palette.lookup('a'), Some(&Tile::part("frame")));

    let replaced = palette.add_entry('a', Tile::part("wheel"), true).unwrap();
    assert_eq!(replaced, Some(Tile::part("frame")));
    assert_eq!(palette.lookup('a'), Some(&Tile::part("wheel")));
}

#[test]
fn test_invalid_entries() {
    let mut palette = Palette::new("test");
    assert!(matches!(palette.add_entry(' ', Tile::part("frame"), false), Err(EngineError::InvalidPaletteChar { ch: ' ' })));
    assert!(matches!(palette.add_entry('b', Tile::new(), false), Err(EngineError::EmptyTemplate { ch: 'b' })));
    assert!(palette.is_empty());
}

#[test]
fn test_remove_entry() {
    let mut palette = Palette::new("test");
    palette.add_entry('x', Tile::part("seat"), false).unwrap();
    assert_eq!(palette.remove_entry('x'), Some(Tile::part("seat")));
    assert_eq!(palette.remove_entry('x'), None);
}

// ============================================================================
// Auto generation
// ============================================================================

#[test]
fn test_identical_tiles_share_one_entry() {
    let grid = grid_of(&[(0, 0, Tile::part("frame")), (1, 0, Tile::part("frame"))]);
    let palette = Palette::auto_generate(&grid, false).unwrap();

    assert_eq!(palette.len(), 1);
    assert_eq!(palette.find_template(&Tile::part("frame")), Some('a'));
}

#[test]
fn test_chars_follow_grid_order() {
    let grid = grid_of(&[
        (0, 1, Tile::part("wheel")),
        (5, 0, Tile::part("seat")),
        (0, 0, Tile::part("frame")),
        (1, 1, Tile::part("frame")),
    ]);
    let palette = Palette::auto_generate(&grid, false).unwrap();

    let entries: Vec<(char, Tile)> = palette.iter().map(|(ch, tile)| (ch, tile.clone())).collect();
    assert_eq!(
        entries,
        vec![('a', Tile::part("frame")), ('b', Tile::part("seat")), ('c', Tile::part("wheel"))]
    );
}

#[test]
fn test_multi_part_tiles() {
    let grid = grid_of(&[
        (0, 0, Tile::parts(["frame", "tank"]).with_fuel("diesel")),
        (1, 0, Tile::part("frame")),
    ]);

    let combined = Palette::auto_generate(&grid, false).unwrap();
    assert_eq!(combined.len(), 2);
    assert_eq!(combined.lookup('a'), Some(&Tile::parts(["frame", "tank"]).with_fuel("diesel")));

    let split = Palette::auto_generate(&grid, true).unwrap();
    assert_eq!(split.len(), 3);
    assert_eq!(split.lookup('a'), Some(&Tile::part("frame").with_fuel("diesel")));
    assert_eq!(split.lookup('b'), Some(&Tile::part("tank").with_fuel("diesel")));
    assert_eq!(split.lookup('c'), Some(&Tile::part("frame")));
}

#[test]
fn test_extend_keeps_existing_entries() {
    let mut palette = Palette::new("custom");
    palette.add_entry('a', Tile::part("wheel"), false).unwrap();
    let grid = grid_of(&[(0, 0, Tile::part("wheel")), (0, 1, Tile::part("frame"))]);

    assert_eq!(palette.extend_from_grid(&grid, false).unwrap(), 1);
    assert_eq!(palette.lookup('b'), Some(&Tile::part("frame")));
    assert_eq!(palette.id, "custom");
}

#[test]
fn test_exhausted_palette_is_left_untouched() {
    let candidates = candidate_chars().count() as i32;
    let grid: GridModel = (0..=candidates).map(|x| (Position::new(x, 0), Tile::part(format!("part_{x}")))).collect();

    assert!(matches!(Palette::auto_generate(&grid, false), Err(EngineError::PaletteExhausted)));

    let mut palette = Palette::new("test");
    palette.add_entry('a', Tile::part("frame"), false).unwrap();
    assert!(palette.extend_from_grid(&grid, false).is_err());
    assert_eq!(palette.len(), 1);
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_describe() {
    let mut palette = Palette::new("test");
    palette
        .add_entry('c', Tile::parts(["frame", "tank"]).with_fuel("gasoline").with_item(ItemEntry::item("jack")), false)
        .unwrap();
    assert_eq!(palette.describe('c').unwrap(), "c - Parts: frame, tank (fuel: gasoline) | Item: jack");
    assert_eq!(palette.describe('z'), None);
}

#[test]
fn test_filter_is_case_insensitive() {
    let mut palette = Palette::new("test");
    palette.add_entry('a', Tile::part("frame"), false).unwrap();
    palette.add_entry('b', Tile::part("wheel_wide"), false).unwrap();
    palette.add_entry('c', Tile::new().with_item(ItemEntry::groups(["tools"])), false).unwrap();

    let hits: Vec<char> = palette.filter("WHEEL").into_iter().map(|(ch, _)| ch).collect();
    assert_eq!(hits, vec!['b']);
    assert_eq!(palette.filter("").len(), 3);
    assert_eq!(palette.filter("groups").len(), 1);
}
