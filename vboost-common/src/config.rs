//! Configuration loading
//!
//! Bootstrap configuration read from a TOML file. Every field has a built-in
//! default, and a missing or unreadable file never stops startup: it produces a
//! warning and the compiled defaults.
//!
//! # Sources Priority
//!
//! Config file:
//! 1. Explicit path passed by the host
//! 2. `VBOOST_CONFIG` environment variable
//! 3. `<config dir>/vboost/config.toml`
//! 4. Built-in defaults
//!
//! Database path:
//! 1. Explicit path passed by the host
//! 2. `VBOOST_DB_PATH` environment variable
//! 3. `database.path` from the TOML file
//! 4. `<local data dir>/vboost/levels.db`

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "VBOOST_CONFIG";

/// Environment variable naming the domain store database
pub const DB_PATH_ENV_VAR: &str = "VBOOST_DB_PATH";

/// Complete bootstrap configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct VboostConfig {
    pub database: DatabaseConfig,
    pub audio: AudioConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}

/// Domain store location
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; `None` means the platform default
    pub path: Option<PathBuf>,
}

/// Gain engine parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Processing context sample rate (Hz)
    pub sample_rate: u32,

    /// Gain smoothing time constant in seconds
    pub smoothing_time_constant_s: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48_000,
            smoothing_time_constant_s: 0.1,
        }
    }
}

/// Event bus sizing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// Events buffered per subscriber before the oldest are dropped
    pub bus_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self { bus_capacity: 100 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive string
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl VboostConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load configuration following the priority order, falling back to
    /// defaults on any failure
    pub fn load(explicit: Option<&Path>) -> Self {
        let path = match locate_config_file(explicit) {
            Some(p) => p,
            None => {
                info!("No config file found, using defaults");
                return Self::default();
            }
        };

        match Self::from_file(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 {
            return Err(Error::Config("audio.sample_rate must be positive".to_string()));
        }
        if !self.audio.smoothing_time_constant_s.is_finite()
            || self.audio.smoothing_time_constant_s < 0.0
        {
            return Err(Error::Config(
                "audio.smoothing_time_constant_s must be a non-negative number".to_string(),
            ));
        }
        if self.events.bus_capacity == 0 {
            return Err(Error::Config("events.bus_capacity must be positive".to_string()));
        }
        Ok(())
    }

    /// Resolve the domain store database path
    pub fn resolve_db_path(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }

        if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.database.path {
            return path.clone();
        }

        default_db_path()
    }
}

/// Find the config file to read, if any
fn locate_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("vboost").join("config.toml"))
        .filter(|p| p.exists())
}

/// OS-dependent default database location
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("vboost"))
        .unwrap_or_else(|| PathBuf::from("./vboost_data"))
        .join("levels.db")
}
