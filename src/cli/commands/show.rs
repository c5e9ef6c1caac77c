//! cli::commands::show
//!
//! The `show` command: inspect the rule store, one partition, or one
//! scope.

use anyhow::{bail, Result};

use crate::cli::args::PartitionArg;
use crate::cli::Context;
use crate::core::rules::RuleSet;
use crate::core::store::RuleStore;
use crate::core::types::{Partition, ScopeKey};
use crate::ui::output;

/// Execute the show command.
pub fn execute(
    ctx: &Context,
    partition: Option<PartitionArg>,
    key: Option<&str>,
    json: bool,
) -> Result<()> {
    let (_, store) = super::open_store(ctx);

    match (partition, key) {
        (None, _) => show_store(ctx, &store, json),
        (Some(partition), None) => show_partition(ctx, &store, partition.into(), json),
        (Some(partition), Some(key)) => show_scope(&store, partition.into(), key, json),
    }
}

fn show_store(ctx: &Context, store: &RuleStore, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store)?);
        return Ok(());
    }
    for partition in [
        Partition::Zips,
        Partition::Cities,
        Partition::States,
        Partition::National,
    ] {
        show_partition(ctx, store, partition, false)?;
    }
    Ok(())
}

fn show_partition(
    ctx: &Context,
    store: &RuleStore,
    partition: Partition,
    json: bool,
) -> Result<()> {
    if json {
        let value = match partition {
            Partition::Zips => serde_json::to_value(&store.zips),
            Partition::Cities => serde_json::to_value(&store.cities),
            Partition::States => serde_json::to_value(&store.states),
            Partition::National => serde_json::to_value(&store.national_default),
        }?;
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::print(format!("[{partition}]"), ctx.verbosity);
    match partition {
        Partition::Zips => {
            for (key, rules) in &store.zips {
                println!("  {key}:");
                render_rules(rules, "    ");
            }
        }
        Partition::Cities => {
            for (key, rules) in &store.cities {
                println!("  {key}:");
                render_rules(rules, "    ");
            }
        }
        Partition::States => {
            for (key, rules) in &store.states {
                println!("  {key}:");
                render_rules(rules, "    ");
            }
        }
        Partition::National => render_rules(&store.national_default, "  "),
    }
    Ok(())
}

fn show_scope(store: &RuleStore, partition: Partition, raw: &str, json: bool) -> Result<()> {
    let key = ScopeKey::parse(partition, Some(raw))?;
    let Some(rules) = store.rule_set(&key) else {
        bail!("scope '{key}' does not exist");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(rules)?);
    } else {
        render_rules(rules, "");
    }
    Ok(())
}

fn render_rules(rules: &RuleSet, indent: &str) {
    if let Some(company) = &rules.company {
        println!("{indent}company: {company}");
    }
    if let Some(default) = &rules.default {
        println!("{indent}default: {default}");
    }
    if let Some(link) = &rules.earth911_link {
        println!("{indent}earth911_link: {link}");
    }
    if let Some(fetched_at) = rules.fetched_at {
        println!("{indent}_fetched_at: {fetched_at}");
    }
    for (label, text) in &rules.items {
        println!("{indent}{label}: {text}");
    }
}
