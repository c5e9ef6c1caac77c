//! core::rules
//!
//! The rule set record: per-item disposal instructions for one scope.
//!
//! # Reserved keys
//!
//! A serialized rule set is an open string-to-string mapping, but four
//! keys are reserved and carried as named fields rather than ordinary
//! entries: `company` (waste service provider), `default` (fallback
//! instruction within the set), `earth911_link` and `_fetched_at`
//! (provenance and freshness metadata for synthesized sets).
//! Enumerating "all rules" never yields the reserved keys.
//!
//! # Example
//!
//! ```
//! use curbside::core::rules::RuleSet;
//!
//! let mut rules = RuleSet::with_default("Check local guidelines.");
//! rules.items.insert("bottle".into(), "Rinse and recycle.".into());
//!
//! assert_eq!(rules.instruction_for("bottle"), Some("Rinse and recycle."));
//! // Unknown items fall back to the set's default
//! assert_eq!(rules.instruction_for("cup"), Some("Check local guidelines."));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Instruction used when a scope is created and nothing else is known.
pub const FALLBACK_INSTRUCTION: &str = "No specific instruction available.";

/// The reserved keys of a serialized rule set.
pub const RESERVED_KEYS: [&str; 4] = ["company", "default", "earth911_link", "_fetched_at"];

/// Disposal instructions for one scope.
///
/// Arbitrary item labels map to instruction text (possibly empty) in
/// `items`; the reserved keys live in the named optional fields and are
/// flattened into the same JSON object on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Waste service provider for this scope.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Fallback instruction for items with no entry of their own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Provider-search link for synthesized sets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub earth911_link: Option<String>,

    /// Seconds since epoch at which a synthesized set was produced.
    /// Informational only; resolution never consults it.
    #[serde(rename = "_fetched_at", skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<i64>,

    /// Item label to instruction text.
    #[serde(flatten)]
    pub items: BTreeMap<String, String>,
}

impl RuleSet {
    /// Create a rule set containing only a `default` instruction.
    pub fn with_default(text: impl Into<String>) -> Self {
        Self {
            default: Some(text.into()),
            ..Self::default()
        }
    }

    /// The instruction for an item label, falling back to the set's
    /// `default` when the item has no entry of its own.
    pub fn instruction_for(&self, label: &str) -> Option<&str> {
        self.items
            .get(label)
            .or(self.default.as_ref())
            .map(String::as_str)
    }

    /// Whether a label is one of the reserved keys.
    pub fn is_reserved(label: &str) -> bool {
        RESERVED_KEYS.contains(&label)
    }

    /// True when the set carries no instructions and no reserved fields.
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.default.is_none()
            && self.earth911_link.is_none()
            && self.fetched_at.is_none()
            && self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_falls_back_to_default() {
        let mut rules = RuleSet::with_default("ask the city");
        rules.items.insert("bottle".into(), "rinse it".into());

        assert_eq!(rules.instruction_for("bottle"), Some("rinse it"));
        assert_eq!(rules.instruction_for("vase"), Some("ask the city"));
    }

    #[test]
    fn instruction_none_without_default() {
        let rules = RuleSet::default();
        assert_eq!(rules.instruction_for("bottle"), None);
    }

    #[test]
    fn empty_instruction_text_is_a_valid_entry() {
        let mut rules = RuleSet::with_default("fallback");
        rules.items.insert("cup".into(), String::new());

        // An empty string is a real instruction, not a missing one
        assert_eq!(rules.instruction_for("cup"), Some(""));
    }

    #[test]
    fn reserved_keys_serialize_inline() {
        let mut rules = RuleSet::with_default("fallback");
        rules.company = Some("City Waste Co".into());
        rules.fetched_at = Some(1_700_000_000);
        rules.items.insert("bottle".into(), "recycle".into());

        let json = serde_json::to_value(&rules).unwrap();
        assert_eq!(json["company"], "City Waste Co");
        assert_eq!(json["default"], "fallback");
        assert_eq!(json["_fetched_at"], 1_700_000_000);
        assert_eq!(json["bottle"], "recycle");
    }

    #[test]
    fn reserved_keys_deserialize_into_named_fields() {
        let json = r#"{
            "bottle": "recycle",
            "company": "City Waste Co",
            "default": "ask",
            "earth911_link": "https://search.earth911.com/?where=94105",
            "_fetched_at": 1700000000
        }"#;
        let rules: RuleSet = serde_json::from_str(json).unwrap();

        assert_eq!(rules.company.as_deref(), Some("City Waste Co"));
        assert_eq!(rules.default.as_deref(), Some("ask"));
        assert_eq!(rules.fetched_at, Some(1_700_000_000));
        // The open mapping only holds item labels
        assert_eq!(rules.items.len(), 1);
        assert_eq!(rules.items["bottle"], "recycle");
    }

    #[test]
    fn absent_reserved_keys_are_omitted_from_json() {
        let rules = RuleSet::default();
        let json = serde_json::to_string(&rules).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn reserved_key_check() {
        for key in RESERVED_KEYS {
            assert!(RuleSet::is_reserved(key));
        }
        assert!(!RuleSet::is_reserved("bottle"));
    }

    #[test]
    fn is_empty() {
        assert!(RuleSet::default().is_empty());
        assert!(!RuleSet::with_default("x").is_empty());
    }
}
