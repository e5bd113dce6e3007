//! Paint scripts
//!
//! Replays editor input through an [`EditSession`] without a window. One
//! command per line. A word starting with `#` begins a comment when it opens
//! the line or follows all of a command's arguments, so `key #` selects the
//! `#` palette character. Coordinates are model cells; they
//! are converted to screen points through the session's view, so scripts
//! behave the same under any zoom or rotation.
//!
//! ```text
//! tool square          # paint, erase, square, square_erase, edit_tile, pan
//! key a                # a palette character, or up/down/left/right
//! down primary 0 0     # primary|left, middle, secondary|right
//! move 1 1
//! up primary 2 2
//! scroll 1 0 0         # zoom steps at a cell
//! rotate 90
//! edit 3 3 b           # tile editor result: a palette character or '-' to clear
//! undo
//! redo
//! ```

use anyhow::{Context, bail};
use vehicle_engine::{
    EditSession, EngineError, Palette, Position, Rotation, ScreenPoint, Tile, TileEditor, Tool,
    events::{InputEvent, Key, PointerButton, SideEffect},
};

#[derive(Clone, Debug, PartialEq)]
pub enum ScriptCommand {
    Tool(Tool),
    Key(Key),
    Down(PointerButton, Position),
    Move(Position),
    Up(PointerButton, Position),
    Scroll(f32, Position),
    Rotate(Rotation),
    /// Palette character to place, `None` clears the tile
    Edit(Position, Option<char>),
    Undo,
    Redo,
}

/// Summary of a replayed script
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub commands: usize,
    pub history_changes: usize,
    pub skipped: usize,
}

/// Parse a whole script. Nothing is replayed when any line is invalid.
pub fn parse_script(text: &str) -> anyhow::Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.first().map_or(true, |word| word.starts_with('#')) {
            continue;
        }
        let command = parse_line(&words).with_context(|| format!("line {line_number}: '{}'", line.trim()))?;
        commands.push((line_number, command));
    }
    Ok(commands)
}

/// Number of arguments following `name`
fn arity(name: &str) -> Option<usize> {
    Some(match name {
        "undo" | "redo" => 0,
        "tool" | "key" | "rotate" => 1,
        "move" => 2,
        "down" | "up" | "scroll" | "edit" => 3,
        _ => return None,
    })
}

fn parse_line(words: &[&str]) -> anyhow::Result<ScriptCommand> {
    let name = words[0];
    let count = arity(name).with_context(|| format!("unknown command '{name}'"))?;
    if words.len() <= count {
        bail!("'{name}' takes {count} argument(s)");
    }
    let (words, rest) = words.split_at(count + 1);
    if let Some(extra) = rest.first() {
        if !extra.starts_with('#') {
            bail!("unexpected '{extra}' after '{name}'");
        }
    }

    let command = match words {
        ["tool", id] => ScriptCommand::Tool(Tool::from_id(id).with_context(|| format!("unknown tool '{id}'"))?),
        ["key", key] => ScriptCommand::Key(parse_key(key)?),
        ["down", button, x, y] => ScriptCommand::Down(parse_button(button)?, parse_cell(x, y)?),
        ["move", x, y] => ScriptCommand::Move(parse_cell(x, y)?),
        ["up", button, x, y] => ScriptCommand::Up(parse_button(button)?, parse_cell(x, y)?),
        ["scroll", steps, x, y] => ScriptCommand::Scroll(steps.parse()?, parse_cell(x, y)?),
        ["rotate", degrees] => ScriptCommand::Rotate(Rotation::from_degrees(degrees.parse()?)?),
        ["edit", x, y, content] => ScriptCommand::Edit(parse_cell(x, y)?, parse_content(content)?),
        ["undo"] => ScriptCommand::Undo,
        ["redo"] => ScriptCommand::Redo,
        _ => bail!("unknown command '{name}'"),
    };
    Ok(command)
}

fn parse_key(key: &str) -> anyhow::Result<Key> {
    Ok(match key {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        _ => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => Key::Char(ch),
                _ => bail!("a key is a single character or an arrow name"),
            }
        }
    })
}

fn parse_button(button: &str) -> anyhow::Result<PointerButton> {
    Ok(match button {
        "primary" | "left" => PointerButton::Primary,
        "middle" => PointerButton::Middle,
        "secondary" | "right" => PointerButton::Secondary,
        _ => bail!("unknown button '{button}'"),
    })
}

fn parse_cell(x: &str, y: &str) -> anyhow::Result<Position> {
    Ok(Position::new(x.parse()?, y.parse()?))
}

fn parse_content(content: &str) -> anyhow::Result<Option<char>> {
    let mut chars = content.chars();
    match (chars.next(), chars.next()) {
        (Some('-'), None) => Ok(None),
        (Some(ch), None) => Ok(Some(ch)),
        _ => bail!("tile content is a palette character or '-'"),
    }
}

/// Tile editor answering with a palette template
struct PaletteTileEditor {
    content: Option<char>,
}

impl TileEditor for PaletteTileEditor {
    fn edit_tile(&mut self, pos: Position, _current: Option<&Tile>, palette: &Palette) -> Option<Tile> {
        match self.content {
            None => Some(Tile::new()),
            Some(ch) => {
                let template = palette.lookup(ch).cloned();
                if template.is_none() {
                    log::warn!("edit at {pos}: '{ch}' is not in the palette");
                }
                template
            }
        }
    }
}

/// Replay parsed commands on `session`
pub fn run_script(session: &mut EditSession, commands: &[(usize, ScriptCommand)]) -> ScriptReport {
    let mut report = ScriptReport::default();

    for (line, command) in commands {
        report.commands += 1;
        let effects = match command {
            ScriptCommand::Tool(tool) => {
                log::debug!("line {line}: {} tool", tool.name());
                session.select_tool(*tool);
                Vec::new()
            }
            ScriptCommand::Key(key) => session.handle_event(InputEvent::Key(*key)),
            ScriptCommand::Down(button, cell) => {
                let pos = screen_point(session, *cell);
                session.handle_event(InputEvent::PointerDown { button: *button, pos })
            }
            ScriptCommand::Move(cell) => {
                let pos = screen_point(session, *cell);
                session.handle_event(InputEvent::PointerMove { pos })
            }
            ScriptCommand::Up(button, cell) => {
                let pos = screen_point(session, *cell);
                session.handle_event(InputEvent::PointerUp { button: *button, pos })
            }
            ScriptCommand::Scroll(steps, cell) => {
                let pos = screen_point(session, *cell);
                session.handle_event(InputEvent::Scroll { steps: *steps, pos })
            }
            ScriptCommand::Rotate(rotation) => {
                session.view_mut().set_rotation(*rotation);
                Vec::new()
            }
            ScriptCommand::Edit(cell, content) => {
                let mut editor = PaletteTileEditor { content: *content };
                if session.edit_tile_with(*cell, &mut editor) {
                    vec![SideEffect::HistoryChanged]
                } else {
                    Vec::new()
                }
            }
            ScriptCommand::Undo | ScriptCommand::Redo => {
                let result = if *command == ScriptCommand::Undo { session.undo_with_effects() } else { session.redo_with_effects() };
                match result {
                    Ok(effects) => effects,
                    Err(err @ EngineError::EmptyHistory { .. }) => {
                        log::warn!("line {line}: {err}");
                        report.skipped += 1;
                        Vec::new()
                    }
                    Err(err) => {
                        log::error!("line {line}: {err}");
                        report.skipped += 1;
                        Vec::new()
                    }
                }
            }
        };

        for effect in effects {
            match effect {
                SideEffect::HistoryChanged => report.history_changes += 1,
                SideEffect::OpenTileEditor(pos) => log::info!("line {line}: tile editor requested at {pos}, use 'edit' to answer"),
                _ => {}
            }
        }
    }
    report
}

/// Screen point at the centre of `cell`
fn screen_point(session: &EditSession, cell: Position) -> ScreenPoint {
    session.view().model_to_screen(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vehicle_engine::Vehicle;

    fn create_session() -> EditSession {
        let mut palette = Palette::new("test");
        palette.add_entry('a', Tile::part("frame"), false).unwrap();
        palette.add_entry('b', Tile::part("wheel"), false).unwrap();
        EditSession::with_vehicle(Vehicle::default(), palette)
    }

    #[test]
    fn test_parse_script() {
        let script = "# square\ntool square\nkey a\n\ndown left 0 0   # anchor\nup primary 2 -1\nedit 4 4 -\nundo\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                (2, ScriptCommand::Tool(Tool::Square)),
                (3, ScriptCommand::Key(Key::Char('a'))),
                (5, ScriptCommand::Down(PointerButton::Primary, Position::new(0, 0))),
                (6, ScriptCommand::Up(PointerButton::Primary, Position::new(2, -1))),
                (7, ScriptCommand::Edit(Position::new(4, 4), None)),
                (8, ScriptCommand::Undo),
            ]
        );
    }

    #[test]
    fn test_hash_as_palette_character() {
        let commands = parse_script("key #\nkey #  # frame\nedit 1 2 #\n  # indented comment\nundo # again\n").unwrap();
        assert_eq!(
            commands,
            vec![
                (1, ScriptCommand::Key(Key::Char('#'))),
                (2, ScriptCommand::Key(Key::Char('#'))),
                (3, ScriptCommand::Edit(Position::new(1, 2), Some('#'))),
                (5, ScriptCommand::Undo),
            ]
        );
        assert!(parse_script("key a b").is_err());
        assert!(parse_script("move 1").is_err());
    }

    #[test]
    fn test_paint_with_hash_key() {
        let mut palette = Palette::new("test");
        palette.add_entry('#', Tile::part("frame"), false).unwrap();
        let mut session = EditSession::with_vehicle(Vehicle::default(), palette);

        let commands = parse_script("key #\ndown primary 0 0\nup primary 1 0\n").unwrap();
        run_script(&mut session, &commands);

        assert_eq!(session.selected_char(), Some('#'));
        assert_eq!(session.grid().len(), 2);
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("tool paint\nrotate 45\n").unwrap_err();
        assert!(format!("{err:#}").starts_with("line 2"));
        assert!(parse_script("down sideways 0 0").is_err());
        assert!(parse_script("key ab").is_err());
        assert!(parse_script("tool brush").is_err());
    }

    #[test]
    fn test_run_square_and_undo() {
        let mut session = create_session();
        let commands = parse_script("tool square\nkey b\ndown primary 0 0\nmove 1 1\nup primary 2 2\nundo\nredo\nredo\n").unwrap();
        let report = run_script(&mut session, &commands);

        assert_eq!(session.grid().len(), 9);
        assert_eq!(report.history_changes, 3);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn test_run_under_rotation_and_zoom() {
        let mut session = create_session();
        let commands = parse_script("rotate 270\nscroll 3 5 5\nkey a\ndown primary 1 2\nup primary 3 2\n").unwrap();
        run_script(&mut session, &commands);

        let painted: Vec<Position> = session.grid().positions().collect();
        assert_eq!(painted, vec![Position::new(1, 2), Position::new(2, 2), Position::new(3, 2)]);
    }

    #[test]
    fn test_edit_command() {
        let mut session = create_session();
        let commands = parse_script("edit 1 1 b\nedit 2 2 z\nedit 1 1 -\n").unwrap();
        let report = run_script(&mut session, &commands);

        assert!(session.grid().is_empty());
        assert_eq!(report.history_changes, 2);
        assert_eq!(session.undo_stack_len(), 2);
    }
}
