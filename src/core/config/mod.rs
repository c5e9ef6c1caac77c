//! core::config
//!
//! Configuration loading.
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$CURBSIDE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/curbside/config.toml`
//! 3. `~/.curbside/config.toml` (canonical location)
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides
//! earlier): built-in defaults, config file, CLI flags (applied by the
//! CLI layer, not here).

pub mod schema;

pub use schema::{GeoConfig, GlobalConfig};

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::paths;
use crate::geo::DEFAULT_ENDPOINT;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// The parsed file contents (defaults when no file was found).
    pub global: GlobalConfig,
    /// Path of the file that was loaded, if any.
    loaded_from: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Missing config files are not an error (defaults are used).
    ///
    /// # Errors
    ///
    /// Returns an error only if a config file exists but cannot be read,
    /// parsed, or validated.
    pub fn load() -> Result<Self, ConfigError> {
        for candidate in Self::search_paths() {
            if candidate.exists() {
                let global = Self::read_file(&candidate)?;
                global.validate()?;
                return Ok(Self {
                    global,
                    loaded_from: Some(candidate),
                });
            }
        }
        Ok(Self::default())
    }

    /// Candidate config paths, highest precedence first.
    fn search_paths() -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        if let Ok(path) = std::env::var("CURBSIDE_CONFIG") {
            candidates.push(PathBuf::from(path));
        }
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            candidates.push(PathBuf::from(xdg_home).join("curbside/config.toml"));
        }
        if let Some(path) = paths::default_config_path() {
            candidates.push(path);
        }
        candidates
    }

    fn read_file(path: &PathBuf) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Rules-file override from the config, if any. The CLI flag takes
    /// precedence over this; the built-in default applies when both are
    /// absent.
    pub fn store_path(&self) -> Option<&PathBuf> {
        self.global.store_path.as_ref()
    }

    /// Geo service endpoint. Defaults to the public Zippopotam.us API.
    pub fn geo_endpoint(&self) -> &str {
        self.global
            .geo
            .as_ref()
            .and_then(|g| g.endpoint.as_deref())
            .unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Whether to skip the geo service. Defaults to `false`.
    pub fn offline(&self) -> bool {
        self.global
            .geo
            .as_ref()
            .and_then(|g| g.offline)
            .unwrap_or(false)
    }

    /// Path of the loaded config file, if one was found.
    pub fn loaded_from(&self) -> Option<&PathBuf> {
        self.loaded_from.as_ref()
    }
}
