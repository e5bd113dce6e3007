use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fs, io::Write, path::PathBuf};

use vehicle_engine::view::clamp_zoom;

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "org";
const PROJECT_ORGANIZATION: &str = "CataclysmBN";
const PROJECT_APPLICATION: &str = "vehicle_painter";

/// Lazily initialized project directories (computed once on first access)
pub(crate) static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

/// Persistent options, stored in `settings.toml`.
///
/// Command line flags override every value for a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Auto generated palettes get one entry per part instead of one per tile
    #[serde(default)]
    pub split_multi_part: bool,

    /// Shift loaded vehicles so their occupied area starts at (0, 0)
    #[serde(default = "default_true")]
    pub normalize_on_load: bool,

    /// Initial zoom of headless editing sessions
    #[serde(default = "default_zoom")]
    pub default_zoom: f32,

    /// Write palette documents indented
    #[serde(default = "default_true")]
    pub pretty_palette: bool,
}

fn default_true() -> bool {
    true
}

fn default_zoom() -> f32 {
    1.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            split_multi_part: false,
            normalize_on_load: true,
            default_zoom: default_zoom(),
            pretty_palette: true,
        }
    }
}

impl Settings {
    pub const FILE_NAME: &'static str = "settings.toml";

    /// Load the settings file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load() -> Self {
        let Some(options_file) = Self::config_file() else {
            return Self::default();
        };
        if !options_file.exists() {
            return Self::default();
        }

        match fs::read_to_string(&options_file) {
            Ok(txt) => match Self::from_toml(&txt) {
                Ok(settings) => return settings,
                Err(err) => log::error!("Error parsing {}: {}", options_file.display(), err),
            },
            Err(err) => log::error!("Error reading options file: {}", err),
        }
        Self::default()
    }

    pub fn from_toml(txt: &str) -> Result<Self, toml::de::Error> {
        let mut settings: Self = toml::from_str(txt)?;
        settings.default_zoom = clamp_zoom(settings.default_zoom);
        Ok(settings)
    }

    /// Atomically write settings to file (write to temp, then rename).
    pub fn store(&self) -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir().ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
        fs::create_dir_all(&config_dir)?;

        let file_path = config_dir.join(Self::FILE_NAME);
        let temp_path = config_dir.join(format!(".{}.tmp", Self::FILE_NAME));
        let text = toml::to_string_pretty(self)?;

        let write_result = (|| -> std::io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(text.as_bytes())?;
            file.sync_all()?;
            Ok(())
        })();
        if let Err(err) = write_result.and_then(|()| fs::rename(&temp_path, &file_path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        Ok(file_path)
    }

    pub fn config_dir() -> Option<PathBuf> {
        PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_keys_use_defaults() {
        assert_eq!(Settings::from_toml("").unwrap(), Settings::default());

        let settings = Settings::from_toml("split_multi_part = true\ndefault_zoom = 12.0\n").unwrap();
        assert!(settings.split_multi_part);
        assert!(settings.normalize_on_load);
        assert_eq!(settings.default_zoom, 4.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let settings = Settings {
            split_multi_part: true,
            normalize_on_load: false,
            default_zoom: 2.0,
            pretty_palette: false,
        };
        let txt = toml::to_string_pretty(&settings).unwrap();
        assert_eq!(Settings::from_toml(&txt).unwrap(), settings);
    }
}
