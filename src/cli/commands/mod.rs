//! cli::commands
//!
//! Command handler implementations. Each submodule exposes an `execute`
//! function taking the shared [`Context`](crate::cli::Context) and the
//! command's arguments.

pub mod completion;
pub mod lookup;
pub mod provider;
pub mod rule;
pub mod scope;
pub mod show;

use anyhow::{Context as _, Result};

use crate::cli::Context;
use crate::core::persist::RulesFile;
use crate::core::store::RuleStore;
use crate::core::types::ScopeKey;
use crate::ui::output;

/// Parse a CLI scope selector, turning the type error into a user-facing
/// one.
pub(crate) fn parse_selector(raw: &str) -> Result<ScopeKey> {
    raw.parse::<ScopeKey>()
        .with_context(|| format!("invalid scope selector '{raw}'"))
}

/// Open the rules file for this invocation, surfacing any load warning.
pub(crate) fn open_store(ctx: &Context) -> (RulesFile, RuleStore) {
    let file = RulesFile::with_path(ctx.store_path.clone());
    let loaded = file.load();
    if let Some(warning) = loaded.warning {
        output::warn(warning, ctx.verbosity);
    }
    (file, loaded.store)
}

/// Persist the store back to its file.
pub(crate) fn save_store(file: &RulesFile, store: &RuleStore) -> Result<()> {
    file.save(store).context("failed to save rules file")
}
