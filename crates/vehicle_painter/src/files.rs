//! File helpers shared by the subcommands

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail};
use vehicle_engine::{Palette, Vehicle, document};

/// Load every vehicle stored in `path`
pub fn read_vehicles(path: &Path) -> anyhow::Result<Vec<Vehicle>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let vehicles = document::load_vehicles(&text).with_context(|| format!("loading vehicles from {}", path.display()))?;
    log::info!("{}: {} vehicle(s)", path.display(), vehicles.len());
    Ok(vehicles)
}

/// Load one vehicle: the one with `id`, or the first in the file
pub fn read_vehicle(path: &Path, id: Option<&str>) -> anyhow::Result<Vehicle> {
    let mut vehicles = read_vehicles(path)?;
    match id {
        Some(id) => match vehicles.iter().position(|v| v.id == id) {
            Some(index) => Ok(vehicles.swap_remove(index)),
            None => bail!("{} holds no vehicle '{id}'", path.display()),
        },
        None => {
            if vehicles.is_empty() {
                bail!("{} holds no vehicle", path.display());
            }
            if vehicles.len() > 1 {
                log::warn!("{} holds {} vehicles, using '{}'", path.display(), vehicles.len(), vehicles[0].id);
            }
            Ok(vehicles.swap_remove(0))
        }
    }
}

pub fn read_palette(path: &Path) -> anyhow::Result<Palette> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    document::load_palette(&text).with_context(|| format!("loading palette from {}", path.display()))
}

/// Write `text` to `path` (temp file + rename), or to stdout when `path` is `None`
pub fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    let Some(path) = path else {
        println!("{text}");
        return Ok(());
    };

    let temp_path = temp_path_for(path);
    let write_result = (|| -> std::io::Result<()> {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(text.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    if let Err(err) = write_result {
        let _ = fs::remove_file(&temp_path);
        return Err(err).with_context(|| format!("writing {}", path.display()));
    }
    log::info!("wrote {}", path.display());
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}
