#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use vehicle_engine::{EditSession, Palette, SessionState, Vehicle, document, tools, vehicle::id_from_name};

mod files;
mod script;
mod settings;

pub use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Inspect, convert and paint Cataclysm: Bright Nights vehicle layouts", long_about = None)]
pub struct Args {
    /// Keep loaded vehicles at their stored coordinates
    #[arg(long, global = true)]
    no_normalize: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the vehicles stored in a file
    Info {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Generate a palette covering every tile of a vehicle
    Palette {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Vehicle id (default: first vehicle in the file)
        #[arg(long)]
        vehicle: Option<String>,

        /// One entry per part instead of one per tile
        #[arg(long)]
        split: bool,

        /// Write the palette on a single line
        #[arg(long)]
        compact: bool,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// Print a vehicle as a grid of palette characters
    Blueprint {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long)]
        vehicle: Option<String>,

        /// Palette document (default: auto generated)
        #[arg(long, value_name = "PALETTE")]
        palette: Option<PathBuf>,
    },

    /// Shift a vehicle to start at (0, 0) and export it
    Normalize {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long)]
        vehicle: Option<String>,

        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,
    },

    /// Replay a paint script on a vehicle and export the result
    Paint {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[arg(long)]
        vehicle: Option<String>,

        #[arg(long, value_name = "PALETTE")]
        palette: PathBuf,

        #[arg(long, value_name = "SCRIPT")]
        script: PathBuf,

        /// View and tool state to start from, updated after the run
        #[arg(long, value_name = "STATE")]
        session: Option<PathBuf>,

        /// Initial zoom (default: from settings)
        #[arg(long)]
        zoom: Option<f32>,

        /// New vehicle name; the id is derived from it
        #[arg(long)]
        name: Option<String>,

        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,
    },

    /// List the canvas tools by toolbar slot, with the ids scripts use
    Tools,

    /// Show the settings file, optionally writing the current values to it
    Config {
        #[arg(long)]
        init: bool,
    },
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(dir) = Settings::config_dir() {
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<LoggerHandle> {
    let log_dir = get_log_dir()?;
    let result = Logger::try_with_env_or_str("info").and_then(|logger| {
        logger
            .log_to_file(FileSpec::default().directory(&log_dir).basename("vehicle_painter").suffix("log").suppress_timestamp())
            .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
            .duplicate_to_stderr(Duplicate::Warn)
            .start()
    });
    match result {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logging: {err}");
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _logger = start_logger();
    log::info!("Starting vehicle painter {}", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load();
    let normalize = settings.normalize_on_load && !args.no_normalize;

    match args.command {
        Command::Info { file } => run_info(&file),
        Command::Palette {
            file,
            vehicle,
            split,
            compact,
            output,
        } => {
            let vehicle = load_vehicle(&file, vehicle.as_deref(), normalize)?;
            let palette = Palette::auto_generate(&vehicle.grid, split || settings.split_multi_part)?;
            let json = document::palette_to_json(&palette, settings.pretty_palette && !compact)?;
            files::write_output(output.as_deref(), &json)
        }
        Command::Blueprint { file, vehicle, palette } => {
            let vehicle = load_vehicle(&file, vehicle.as_deref(), normalize)?;
            let palette = match palette {
                Some(path) => files::read_palette(&path)?,
                None => Palette::auto_generate(&vehicle.grid, false)?,
            };
            for row in render_blueprint(&vehicle, &palette) {
                println!("{row}");
            }
            Ok(())
        }
        Command::Normalize { file, vehicle, output } => {
            let vehicle = load_vehicle(&file, vehicle.as_deref(), true)?;
            files::write_output(Some(output.as_path()), &document::vehicle_to_json(&vehicle)?)
        }
        Command::Paint {
            file,
            vehicle,
            palette,
            script,
            session,
            zoom,
            name,
            output,
        } => {
            let vehicle = load_vehicle(&file, vehicle.as_deref(), normalize)?;
            let palette = files::read_palette(&palette)?;
            let script_text = std::fs::read_to_string(&script).with_context(|| format!("reading {}", script.display()))?;
            let commands = script::parse_script(&script_text).with_context(|| format!("parsing {}", script.display()))?;

            let mut editor = EditSession::with_vehicle(vehicle, palette);
            editor.view_mut().set_zoom(zoom.unwrap_or(settings.default_zoom));
            if let Some(path) = &session {
                if let Some(state) = read_session_state(path)? {
                    editor.restore_session_state(&state);
                }
            }

            if let Some(name) = name {
                editor.rename_vehicle(id_from_name(&name), name);
            }

            let report = script::run_script(&mut editor, &commands);
            log::info!(
                "replayed {} commands: {} history changes, {} skipped, {} undo entries",
                report.commands,
                report.history_changes,
                report.skipped,
                editor.undo_stack_len()
            );

            if let Some(path) = &session {
                files::write_output(Some(path.as_path()), &serde_json::to_string_pretty(&editor.session_state())?)?;
            }
            files::write_output(Some(output.as_path()), &document::vehicle_to_json(editor.vehicle())?)?;
            editor.mark_saved();
            Ok(())
        }
        Command::Tools => {
            for row in tool_rows() {
                println!("{row}");
            }
            Ok(())
        }
        Command::Config { init } => {
            match Settings::config_file() {
                Some(path) => println!("{}", path.display()),
                None => println!("(no config directory)"),
            }
            print!("{}", toml::to_string_pretty(&settings)?);
            if init {
                let path = settings.store()?;
                log::info!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}

fn load_vehicle(file: &Path, id: Option<&str>, normalize: bool) -> anyhow::Result<Vehicle> {
    let mut vehicle = files::read_vehicle(file, id)?;
    if normalize {
        let offset = vehicle.normalize().with_context(|| format!("normalizing '{}'", vehicle.id))?;
        if offset != vehicle_engine::Position::default() {
            log::info!("'{}' shifted by {offset}", vehicle.id);
        }
    }
    Ok(vehicle)
}

fn read_session_state(path: &Path) -> anyhow::Result<Option<SessionState>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let state = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(state))
}

fn run_info(file: &Path) -> anyhow::Result<()> {
    for vehicle in files::read_vehicles(file)? {
        let bounds = match vehicle.grid.occupied_bounds() {
            Some(rect) => format!("{} .. {} ({}x{})", rect.start, rect.end, rect.width(), rect.height()),
            None => "empty".to_string(),
        };
        println!("{}\t{}\t{} tiles\t{bounds}", vehicle.id, vehicle.name, vehicle.grid.len());
    }
    Ok(())
}

/// One line per tool: slot, id, shortcut, name and tooltip
fn tool_rows() -> Vec<String> {
    tools::TOOL_SLOTS
        .iter()
        .enumerate()
        .flat_map(|(slot, pair)| {
            let members = if pair.primary == pair.secondary { vec![pair.primary] } else { vec![pair.primary, pair.secondary] };
            members.into_iter().map(move |tool| {
                let shortcut = tool.shortcut().map(String::from).unwrap_or_else(|| "-".to_string());
                format!("{}\t{}\t{shortcut}\t{}\t{}", slot + 1, tool.id(), tool.name(), tool.tooltip())
            })
        })
        .collect()
}

/// Rows of palette characters; `?` marks tiles the palette doesn't cover
fn render_blueprint(vehicle: &Vehicle, palette: &Palette) -> Vec<String> {
    vehicle.render_rows(|pos| vehicle.grid.tile(pos).and_then(|tile| palette.find_template(tile)).unwrap_or('?'))
}
