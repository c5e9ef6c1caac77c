//! cli::commands::rule
//!
//! The `rule set` and `rule remove` commands.

use anyhow::Result;

use crate::cli::args::RuleAction;
use crate::cli::Context;
use crate::ui::output;

/// Execute a rule command.
pub fn execute(ctx: &Context, action: RuleAction) -> Result<()> {
    match action {
        RuleAction::Set { scope, item, text } => set(ctx, &scope, &item, &text),
        RuleAction::Remove { scope, item } => remove(ctx, &scope, &item),
    }
}

fn set(ctx: &Context, selector: &str, item: &str, text: &str) -> Result<()> {
    let key = super::parse_selector(selector)?;
    let (file, mut store) = super::open_store(ctx);

    store.set_instruction(&key, item, text)?;
    super::save_store(&file, &store)?;

    output::success(format!("Set '{item}' in scope '{key}'"), ctx.verbosity);
    Ok(())
}

fn remove(ctx: &Context, selector: &str, item: &str) -> Result<()> {
    let key = super::parse_selector(selector)?;
    let (file, mut store) = super::open_store(ctx);

    store.remove_instruction(&key, item)?;
    super::save_store(&file, &store)?;

    output::success(format!("Removed '{item}' from scope '{key}'"), ctx.verbosity);
    Ok(())
}
