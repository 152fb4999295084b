//! Configuration loading and typed config structures for Farm Navigator.
//!
//! The configuration lives in `farmnav-config.yaml`. Every section and
//! every field has a default, so an empty document (or no file at all)
//! yields a playable story session.

use std::path::{Path, PathBuf};

use farmnav_livestock::LivestockConfig;
use farmnav_types::GameMode;
use farmnav_world::GrowthConfig;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is out of range.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

/// Largest accepted farm side length.
pub const MAX_GRID_SIZE: u32 = 20;

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `farmnav-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Session settings (grid, mode, economy, seed).
    #[serde(default)]
    pub session: SessionConfig,

    /// Tick timing.
    #[serde(default)]
    pub time: TimeConfig,

    /// Weather engine settings.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Crop growth tunables.
    #[serde(default)]
    pub growth: GrowthConfig,

    /// Livestock condition tunables.
    #[serde(default)]
    pub livestock: LivestockConfig,

    /// Progress persistence.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional YAML file overriding the built-in reference tables.
    #[serde(default)]
    pub reference_data_path: Option<PathBuf>,

    /// Optional YAML file replacing the built-in chapter quizzes.
    #[serde(default)]
    pub quiz_path: Option<PathBuf>,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML and
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `session.grid_size` is zero or
    /// above [`MAX_GRID_SIZE`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.session.grid_size;
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(ConfigError::Invalid {
                reason: format!("grid_size must be between 1 and {MAX_GRID_SIZE}, got {size}"),
            });
        }
        Ok(())
    }

    /// Load from `path` when it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Fails only when the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Session-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Side length of the square farm grid (default: 5).
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,

    /// Story (guided, gentler) or sandbox (free play, harsher).
    #[serde(default)]
    pub mode: GameMode,

    /// Credits at session start and after a chapter restart (default: 1000).
    #[serde(default = "default_starting_credits")]
    pub starting_credits: u64,

    /// Chapter id to open in story mode (default: 1).
    #[serde(default = "default_starting_chapter")]
    pub starting_chapter: u32,

    /// Fixed RNG seed for reproducible runs. OS entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Stop the runner after this many simulated days. 0 = unbounded.
    #[serde(default)]
    pub max_days: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            mode: GameMode::default(),
            starting_credits: default_starting_credits(),
            starting_chapter: default_starting_chapter(),
            seed: None,
            max_days: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Tick timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeConfig {
    /// Real milliseconds per simulated day at 1x speed (default: 5000).
    #[serde(default = "default_base_tick_interval_ms")]
    pub base_tick_interval_ms: u64,

    /// Initial speed multiplier, one of 1, 2 or 4 (default: 1).
    #[serde(default = "default_speed")]
    pub speed: u32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            base_tick_interval_ms: default_base_tick_interval_ms(),
            speed: default_speed(),
        }
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherConfig {
    /// Samples kept for lookback queries. 0 keeps everything (default: 365).
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            history_capacity: default_history_capacity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Where chapter progress and badges are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// Chapter progress record (default: `chapter-progress.json`).
    #[serde(default = "default_progress_path")]
    pub progress_path: PathBuf,

    /// Badge collection record (default: `farm-navigator-badges.json`).
    #[serde(default = "default_badges_path")]
    pub badges_path: PathBuf,

    /// Write records to disk. When false, progress is kept in memory.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            progress_path: default_progress_path(),
            badges_path: default_badges_path(),
            enabled: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (default: `info`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text (default: false).
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

const fn default_grid_size() -> u32 {
    5
}

const fn default_starting_credits() -> u64 {
    1000
}

const fn default_starting_chapter() -> u32 {
    1
}

const fn default_base_tick_interval_ms() -> u64 {
    5000
}

const fn default_speed() -> u32 {
    1
}

const fn default_history_capacity() -> usize {
    365
}

fn default_progress_path() -> PathBuf {
    PathBuf::from("chapter-progress.json")
}

fn default_badges_path() -> PathBuf {
    PathBuf::from("farm-navigator-badges.json")
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}
