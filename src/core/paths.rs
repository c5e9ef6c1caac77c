//! core::paths
//!
//! Canonical on-disk locations.
//!
//! Everything curbside persists lives under `~/.curbside/`:
//! `rules.json` (the rule store) and `config.toml` (configuration).
//! Both can be pointed elsewhere (CLI `--store`, `$CURBSIDE_CONFIG`).

use std::path::PathBuf;

/// The `~/.curbside` directory, if a home directory can be determined.
pub fn curbside_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".curbside"))
}

/// Default path of the persisted rule store.
pub fn default_rules_path() -> Option<PathBuf> {
    curbside_dir().map(|dir| dir.join("rules.json"))
}

/// Canonical path of the global config file.
pub fn default_config_path() -> Option<PathBuf> {
    curbside_dir().map(|dir| dir.join("config.toml"))
}
