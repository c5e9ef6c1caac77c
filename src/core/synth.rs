//! core::synth
//!
//! Best-effort rule synthesis for codes with no stored rules.
//!
//! When resolution bottoms out at the national default, the caller may
//! synthesize a generic rule set for the code: a location-aware default
//! instruction, a provider-search pointer, a deterministic Earth911
//! search link, and generic guidance for the recognized categories.
//! Synthesis never persists anything; caching the output into the store's
//! exact-code slot is a separate, explicit step
//! ([`RuleStore::cache_synthesized`](crate::core::store::RuleStore::cache_synthesized)).

use chrono::{DateTime, Utc};

use crate::geo::Location;

use super::rules::RuleSet;
use super::types::ZipCode;

/// Generic guidance per recognized category. Only included when the
/// location is known; for an unplaceable code the set carries just the
/// default instruction and metadata.
const GENERIC_GUIDANCE: [(&str, &str); 4] = [
    ("bottle", "Rinse and place in curbside recycling bin."),
    ("cup", "Check if compostable; otherwise trash."),
    ("wine glass", "Not typically accepted; check local drop-off."),
    ("vase", "Check local rules; may need special handling."),
];

/// Provider pointer for synthesized sets.
const PROVIDER_SEARCH: &str = "Check earth911.com for providers in your area";

/// The Earth911 search link for a code. Deterministic: same code, same
/// link.
pub fn earth911_link(code: &ZipCode) -> String {
    format!("https://search.earth911.com/?where={code}")
}

/// Synthesize a best-effort rule set for a code with no stored rules.
///
/// `fetched_at` is recorded in the set's `_fetched_at` field for display
/// only; resolution never consults it. The caller supplies the timestamp
/// so synthesis itself stays deterministic and testable.
pub fn synthesize(
    code: &ZipCode,
    location: Option<&Location>,
    fetched_at: DateTime<Utc>,
) -> RuleSet {
    let mut rules = RuleSet::default();

    rules.default = Some(match location {
        Some(loc) => format!(
            "Contact waste management for {}, {} for specific recycling instructions.",
            loc.city, loc.state_abbr
        ),
        None => format!("Contact your local waste management about ZIP {code} for specific recycling instructions."),
    });
    rules.company = Some(PROVIDER_SEARCH.to_string());
    rules.earth911_link = Some(earth911_link(code));
    rules.fetched_at = Some(fetched_at.timestamp());

    if location.is_some() {
        for (label, guidance) in GENERIC_GUIDANCE {
            rules.items.insert(label.to_string(), guidance.to_string());
        }
    }

    rules
}
