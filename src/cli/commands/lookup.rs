//! cli::commands::lookup
//!
//! The `lookup` command: resolve disposal rules for a ZIP code.
//!
//! # Flow
//!
//! 1. Validate the code shape (5 digits) and, unless offline, confirm the
//!    code names a real place through the geo service. An unknown code is
//!    rejected, which is a different outcome from a known code with no
//!    stored rules.
//! 2. Resolve through the tiered fallback and report which tier answered.
//! 3. With `--cache`, a resolution that bottomed out at the national
//!    default is replaced by a synthesized rule set saved under the exact
//!    code, so the next lookup short-circuits at tier 1.

use anyhow::{bail, Result};
use chrono::Utc;

use crate::cli::Context;
use crate::core::detect;
use crate::core::resolve::{resolve_rules, Provenance, Resolution};
use crate::core::rules::FALLBACK_INSTRUCTION;
use crate::core::synth;
use crate::core::types::ZipCode;
use crate::geo::{CachingGeo, GeoLookup, Location, ZippopotamGeo};
use crate::ui::output;

/// Execute the lookup command.
pub fn execute(ctx: &Context, zip: &str, items: &[String], cache: bool, json: bool) -> Result<()> {
    let code = match ZipCode::new(zip) {
        Ok(code) => code,
        Err(_) => bail!("'{zip}' is not a valid ZIP code (expected 5 digits)"),
    };

    let (file, mut store) = super::open_store(ctx);
    let location = resolve_location(ctx, &code)?;

    let mut resolution = resolve_rules(&code, location.as_ref(), &store);
    output::debug(
        format!("resolved through tier: {}", resolution.provenance),
        ctx.verbosity,
    );

    if cache && resolution.provenance == Provenance::National {
        let rules = synth::synthesize(&code, location.as_ref(), Utc::now());
        store.cache_synthesized(&code, rules.clone());
        super::save_store(&file, &store)?;
        output::success(format!("Cached synthesized rules for ZIP {code}"), ctx.verbosity);
        resolution = Resolution {
            rules,
            provenance: Provenance::Zip(code.clone()),
        };
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        return Ok(());
    }
    render(ctx, &code, &resolution, items);
    Ok(())
}

/// Resolve the code to a place, or `None` in offline mode.
///
/// An unknown code (the service answered, negatively) is an error here;
/// resolution never runs for a code that names no place.
fn resolve_location(ctx: &Context, code: &ZipCode) -> Result<Option<Location>> {
    if ctx.offline {
        output::debug("offline: skipping geo lookup", ctx.verbosity);
        return Ok(None);
    }

    let geo = CachingGeo::new(ZippopotamGeo::with_endpoint(&ctx.geo_endpoint)?);
    match geo.lookup(code) {
        Ok(Some(location)) => {
            output::debug(
                format!("{code} is {}, {}", location.city, location.state_abbr),
                ctx.verbosity,
            );
            Ok(Some(location))
        }
        Ok(None) => bail!("ZIP {code} is not a known US ZIP code"),
        Err(e) => bail!("could not verify ZIP {code}: {e}"),
    }
}

fn render(ctx: &Context, code: &ZipCode, resolution: &Resolution, items: &[String]) {
    output::print(
        format!("Rules for ZIP {code} (source: {})", resolution.provenance),
        ctx.verbosity,
    );
    if let Some(company) = &resolution.rules.company {
        output::print(format!("Provider: {company}"), ctx.verbosity);
    }

    if items.is_empty() {
        for (label, text) in &resolution.rules.items {
            println!("  {label}: {text}");
        }
        if let Some(default) = &resolution.rules.default {
            println!("  (anything else): {default}");
        }
        return;
    }

    for label in items {
        if !detect::is_recyclable(label) {
            output::warn(
                format!("'{label}' is not a recognized recyclable item; skipping"),
                ctx.verbosity,
            );
            continue;
        }
        let text = resolution
            .rules
            .instruction_for(label)
            .unwrap_or(FALLBACK_INSTRUCTION);
        println!("  {label}: {text}");
    }
}
