//! cli::commands::scope
//!
//! The `scope create` and `scope remove` commands.

use anyhow::Result;

use crate::cli::args::ScopeAction;
use crate::cli::Context;
use crate::ui::output;

/// Execute a scope command.
pub fn execute(ctx: &Context, action: ScopeAction) -> Result<()> {
    match action {
        ScopeAction::Create { scope } => create(ctx, &scope),
        ScopeAction::Remove { scope } => remove(ctx, &scope),
    }
}

fn create(ctx: &Context, selector: &str) -> Result<()> {
    let key = super::parse_selector(selector)?;
    let (file, mut store) = super::open_store(ctx);

    store.create_scope(&key)?;
    super::save_store(&file, &store)?;

    output::success(format!("Created scope '{key}'"), ctx.verbosity);
    Ok(())
}

fn remove(ctx: &Context, selector: &str) -> Result<()> {
    let key = super::parse_selector(selector)?;
    let (file, mut store) = super::open_store(ctx);

    store.remove_scope(&key)?;
    super::save_store(&file, &store)?;

    output::success(format!("Removed scope '{key}'"), ctx.verbosity);
    Ok(())
}
