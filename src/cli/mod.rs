//! cli
//!
//! Command-line interface layer.
//!
//! # Design
//!
//! The CLI layer is thin: it parses arguments, loads configuration,
//! resolves the rules-file path, and delegates to command handlers in
//! [`commands`]. Handlers return `anyhow::Result` so errors surface
//! with full context at the top level.

pub mod args;
pub mod commands;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::core::config::Config;
use crate::core::paths;
use crate::ui::output::Verbosity;

use args::{Cli, Command};

/// Shared state passed to every command handler.
pub struct Context {
    /// Path to the rules file.
    pub store_path: PathBuf,
    /// When set, the external geo service is never called.
    pub offline: bool,
    /// Base URL of the geo service.
    pub geo_endpoint: String,
    /// Output verbosity.
    pub verbosity: Verbosity,
}

/// Main CLI entry point.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let config = Config::load().context("failed to load configuration")?;
    if let Some(path) = config.loaded_from() {
        crate::ui::output::debug(format!("config loaded from {}", path.display()), verbosity);
    }

    // Precedence: command-line flag, then config file, then the default
    // location under the home directory.
    let store_path = match cli.store {
        Some(path) => path,
        None => match config.store_path() {
            Some(path) => path.to_path_buf(),
            None => paths::default_rules_path().context("failed to locate rules file")?,
        },
    };
    crate::ui::output::debug(format!("rules file: {}", store_path.display()), verbosity);

    let ctx = Context {
        store_path,
        offline: cli.offline || config.offline(),
        geo_endpoint: config.geo_endpoint().to_string(),
        verbosity,
    };

    match cli.command {
        Command::Lookup {
            zip,
            items,
            cache,
            json,
        } => commands::lookup::execute(&ctx, &zip, &items, cache, json),
        Command::Scope { action } => commands::scope::execute(&ctx, action),
        Command::Rule { action } => commands::rule::execute(&ctx, action),
        Command::Provider { action } => commands::provider::execute(&ctx, action),
        Command::Show {
            partition,
            key,
            json,
        } => commands::show::execute(&ctx, partition, key.as_deref(), json),
        Command::Completion { shell } => commands::completion::execute(shell),
    }
}
