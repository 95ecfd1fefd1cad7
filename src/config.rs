use crate::consts;
use crate::highscore::{FileStore, HighScoreStore, MemoryStore};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Settings for the log file
    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the store in which the high score should be kept: a file (the
    /// one given in the configuration or, if that is not set, the default
    /// high score file) or, if saving is disabled or no path could be
    /// determined, memory.
    pub(crate) fn high_score_store(&self) -> Box<dyn HighScoreStore> {
        if !self.files.save_high_score {
            return Box::new(MemoryStore::default());
        }
        match self
            .files
            .high_score_file
            .clone()
            .or_else(FileStore::default_path)
        {
            Some(path) => {
                log::debug!("Using high score file {}", path.display());
                Box::new(FileStore::new(path))
            }
            None => {
                log::warn!("Could not determine high score file path; not saving high scores");
                Box::new(MemoryStore::default())
            }
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Number of cells along each side of the grid
    #[serde(deserialize_with = "deserialize_grid_size")]
    pub(crate) grid_size: u16,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid_size: consts::DEFAULT_GRID_SIZE,
        }
    }
}

fn deserialize_grid_size<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let size = u16::deserialize(deserializer)?;
    validate_grid_size(size).map_err(serde::de::Error::custom)
}

/// Check that `size` is a usable grid size
pub(crate) fn validate_grid_size(size: u16) -> Result<u16, GridSizeError> {
    if (consts::MIN_GRID_SIZE..=consts::MAX_GRID_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(GridSizeError(size))
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error(
    "invalid grid size {0}; expected a value between {min} and {max}",
    min = consts::MIN_GRID_SIZE,
    max = consts::MAX_GRID_SIZE
)]
pub(crate) struct GridSizeError(u16);

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// Path to write log messages to
    pub(crate) file: Option<PathBuf>,

    /// Minimum level of messages to log
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
