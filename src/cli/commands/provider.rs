//! cli::commands::provider
//!
//! The `provider set` command.

use anyhow::Result;

use crate::cli::args::ProviderAction;
use crate::cli::Context;
use crate::ui::output;

/// Execute a provider command.
pub fn execute(ctx: &Context, action: ProviderAction) -> Result<()> {
    match action {
        ProviderAction::Set { scope, company } => {
            let key = super::parse_selector(&scope)?;
            let (file, mut store) = super::open_store(ctx);

            store.set_provider(&key, &company)?;
            super::save_store(&file, &store)?;

            output::success(
                format!("Set provider '{company}' for scope '{key}'"),
                ctx.verbosity,
            );
            Ok(())
        }
    }
}
