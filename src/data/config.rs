//! Demo settings
//!
//! Stored as RON in the platform config directory, with built-in defaults
//! when the file is missing or unreadable.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fov::FovEngine;

const SETTINGS_FILE: &str = "settings.ron";

/// Errors raised while reading or writing settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
}

/// User settings for the terminal demo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Text map to load
    pub map_path: PathBuf,
    /// Initial radius of sight
    pub visual_range: i32,
    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from("assets/map.txt"),
            visual_range: FovEngine::DEFAULT_VISUAL_RANGE,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Path of the settings file in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        use directories::ProjectDirs;

        ProjectDirs::from("com", "quadsight", "Quadsight")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// Read settings from a RON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings = ron::from_str(content)?;
        Ok(settings)
    }

    /// Load settings from `explicit`, else the default location, else defaults.
    ///
    /// A missing file is not an error; a broken one is logged and ignored.
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Self::default(),
            },
        };

        if !path.exists() {
            if explicit.is_some() {
                log::warn!("Settings file {} not found, using defaults", path.display());
            }
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// `log_level` as a filter, `None` when it names no level
    pub fn level_filter(&self) -> Option<log::LevelFilter> {
        self.log_level.trim().parse().ok()
    }

    /// Write settings as pretty RON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Command line: `quadsight [--config <file>] [map]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub map: Option<PathBuf>,
}

impl Args {
    pub fn parse<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--config" {
                parsed.config = args.next().map(PathBuf::from);
            } else if parsed.map.is_none() {
                parsed.map = Some(PathBuf::from(arg));
            }
        }
        parsed
    }

    /// Apply command line overrides on top of loaded settings
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(map) = &self.map {
            settings.map_path = map.clone();
        }
    }
}
