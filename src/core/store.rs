//! core::store
//!
//! The hierarchical rule store and its mutation operations.
//!
//! # Structure
//!
//! Four partitions, all always present (an absent partition in the
//! persisted document is normalized to an empty mapping on load):
//!
//! - `zips`: exact 5-digit codes and 3-digit region prefixes
//! - `cities`: `"City, ST"` scopes
//! - `states`: 2-letter state scopes
//! - `national_default`: a single rule set, possibly empty
//!
//! # Mutation model
//!
//! The store is plain in-process mutable state. All edits go through the
//! explicit operations below, each of which validates before mutating and
//! is immediately visible to subsequent resolution calls. Persistence is
//! the caller's job (see [`crate::core::persist`]); the store itself
//! never touches the filesystem.
//!
//! # Example
//!
//! ```
//! use curbside::core::store::RuleStore;
//! use curbside::core::types::ScopeKey;
//!
//! let mut store = RuleStore::default();
//! let scope: ScopeKey = "zip:94105".parse().unwrap();
//!
//! store.create_scope(&scope).unwrap();
//! store.set_instruction(&scope, "bottle", "Rinse and recycle.").unwrap();
//! store.set_provider(&scope, "SF Recology").unwrap();
//!
//! let rules = store.rule_set(&scope).unwrap();
//! assert_eq!(rules.instruction_for("bottle"), Some("Rinse and recycle."));
//! assert_eq!(rules.company.as_deref(), Some("SF Recology"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::rules::{RuleSet, FALLBACK_INSTRUCTION};
use super::types::{CityKey, ScopeKey, StateAbbr, ZipKey};

/// Errors from store mutation operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The scope key already exists in its partition.
    #[error("scope '{0}' already exists")]
    DuplicateScope(String),

    /// The scope key does not exist; create it first.
    #[error("scope '{0}' does not exist (create it first)")]
    ScopeNotFound(String),

    /// The national default always exists and cannot be removed.
    #[error("the national default cannot be removed")]
    NationalImmutable,

    /// The item name is reserved metadata, not an instruction.
    #[error("'{0}' is reserved metadata and cannot be set as an item")]
    ReservedItem(String),
}

/// The hierarchical rule store.
///
/// `BTreeMap` partitions keep the serialized document deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleStore {
    /// Exact-code (tier 1) and region-prefix (tier 4) scopes.
    #[serde(default)]
    pub zips: BTreeMap<ZipKey, RuleSet>,

    /// City-level (tier 2) scopes.
    #[serde(default)]
    pub cities: BTreeMap<CityKey, RuleSet>,

    /// State-level (tier 3) scopes.
    #[serde(default)]
    pub states: BTreeMap<StateAbbr, RuleSet>,

    /// The national default (tier 5); always present, possibly empty.
    #[serde(default)]
    pub national_default: RuleSet,
}

impl RuleStore {
    /// Look up the rule set at a scope, if the scope exists.
    ///
    /// The national scope always exists.
    pub fn rule_set(&self, key: &ScopeKey) -> Option<&RuleSet> {
        match key {
            ScopeKey::Zip(k) => self.zips.get(k),
            ScopeKey::City(k) => self.cities.get(k),
            ScopeKey::State(k) => self.states.get(k),
            ScopeKey::National => Some(&self.national_default),
        }
    }

    fn rule_set_mut(&mut self, key: &ScopeKey) -> Option<&mut RuleSet> {
        match key {
            ScopeKey::Zip(k) => self.zips.get_mut(k),
            ScopeKey::City(k) => self.cities.get_mut(k),
            ScopeKey::State(k) => self.states.get_mut(k),
            ScopeKey::National => Some(&mut self.national_default),
        }
    }

    /// Whether a scope exists.
    pub fn contains(&self, key: &ScopeKey) -> bool {
        self.rule_set(key).is_some()
    }

    /// Create a new scope seeded with the fallback default instruction.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateScope` if the scope already exists.
    /// The national scope always exists, so creating it always fails.
    pub fn create_scope(&mut self, key: &ScopeKey) -> Result<(), StoreError> {
        if self.contains(key) {
            return Err(StoreError::DuplicateScope(key.to_string()));
        }
        let initial = RuleSet::with_default(FALLBACK_INSTRUCTION);
        match key {
            ScopeKey::Zip(k) => self.zips.insert(k.clone(), initial),
            ScopeKey::City(k) => self.cities.insert(k.clone(), initial),
            ScopeKey::State(k) => self.states.insert(k.clone(), initial),
            // Unreachable: contains() is always true for National
            ScopeKey::National => return Err(StoreError::DuplicateScope(key.to_string())),
        };
        Ok(())
    }

    /// Delete a scope outright.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ScopeNotFound` if absent, or
    /// `StoreError::NationalImmutable` for the national scope (clear its
    /// entries instead).
    pub fn remove_scope(&mut self, key: &ScopeKey) -> Result<(), StoreError> {
        let removed = match key {
            ScopeKey::Zip(k) => self.zips.remove(k).is_some(),
            ScopeKey::City(k) => self.cities.remove(k).is_some(),
            ScopeKey::State(k) => self.states.remove(k).is_some(),
            ScopeKey::National => return Err(StoreError::NationalImmutable),
        };
        if removed {
            Ok(())
        } else {
            Err(StoreError::ScopeNotFound(key.to_string()))
        }
    }

    /// Upsert `item -> text` inside an existing scope.
    ///
    /// The reserved names `company`, `default`, and `earth911_link` route
    /// to their named fields so the reserved-key invariant holds across
    /// edits; `_fetched_at` is rejected (it is an integer, not text).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ScopeNotFound` if the scope was never created,
    /// or `StoreError::ReservedItem` for `_fetched_at`.
    pub fn set_instruction(
        &mut self,
        key: &ScopeKey,
        item: &str,
        text: &str,
    ) -> Result<(), StoreError> {
        let rules = self
            .rule_set_mut(key)
            .ok_or_else(|| StoreError::ScopeNotFound(key.to_string()))?;
        match item {
            "company" => rules.company = Some(text.to_string()),
            "default" => rules.default = Some(text.to_string()),
            "earth911_link" => rules.earth911_link = Some(text.to_string()),
            "_fetched_at" => return Err(StoreError::ReservedItem(item.to_string())),
            _ => {
                rules.items.insert(item.to_string(), text.to_string());
            }
        }
        Ok(())
    }

    /// Remove an item from an existing scope. Removing an item that is
    /// not present is a no-op, not an error.
    ///
    /// Reserved names clear the corresponding named field.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ScopeNotFound` if the scope does not exist.
    pub fn remove_instruction(&mut self, key: &ScopeKey, item: &str) -> Result<(), StoreError> {
        let rules = self
            .rule_set_mut(key)
            .ok_or_else(|| StoreError::ScopeNotFound(key.to_string()))?;
        match item {
            "company" => rules.company = None,
            "default" => rules.default = None,
            "earth911_link" => rules.earth911_link = None,
            "_fetched_at" => rules.fetched_at = None,
            _ => {
                rules.items.remove(item);
            }
        }
        Ok(())
    }

    /// Upsert the waste service provider for an existing scope.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::ScopeNotFound` if the scope does not exist.
    pub fn set_provider(&mut self, key: &ScopeKey, company: &str) -> Result<(), StoreError> {
        let rules = self
            .rule_set_mut(key)
            .ok_or_else(|| StoreError::ScopeNotFound(key.to_string()))?;
        rules.company = Some(company.to_string());
        Ok(())
    }

    /// Cache a synthesized rule set into the exact-code (tier 1) slot,
    /// so subsequent lookups for the same code short-circuit at tier 1.
    ///
    /// Unlike [`create_scope`](Self::create_scope), this overwrites an
    /// existing entry: a fresher synthesized set replaces a stale one.
    pub fn cache_synthesized(&mut self, code: &super::types::ZipCode, rules: RuleSet) {
        self.zips.insert(ZipKey::Exact(code.clone()), rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ZipCode;

    fn scope(selector: &str) -> ScopeKey {
        selector.parse().expect("valid selector")
    }

    #[test]
    fn create_then_read_back() {
        let mut store = RuleStore::default();
        let key = scope("zip:94105");

        store.create_scope(&key).unwrap();
        let rules = store.rule_set(&key).unwrap();
        assert_eq!(rules.default.as_deref(), Some(FALLBACK_INSTRUCTION));
    }

    #[test]
    fn create_duplicate_rejected_and_untouched() {
        let mut store = RuleStore::default();
        let key = scope("city:Sacramento, CA");

        store.create_scope(&key).unwrap();
        store.set_instruction(&key, "bottle", "blue bin").unwrap();

        let err = store.create_scope(&key).unwrap_err();
        assert_eq!(err, StoreError::DuplicateScope("city:Sacramento, CA".into()));

        // The existing scope is left untouched
        let rules = store.rule_set(&key).unwrap();
        assert_eq!(rules.instruction_for("bottle"), Some("blue bin"));
    }

    #[test]
    fn create_national_always_duplicate() {
        let mut store = RuleStore::default();
        let err = store.create_scope(&ScopeKey::National).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateScope(_)));
    }

    #[test]
    fn set_instruction_requires_existing_scope() {
        let mut store = RuleStore::default();
        let err = store
            .set_instruction(&scope("zip:94105"), "bottle", "recycle")
            .unwrap_err();
        assert!(matches!(err, StoreError::ScopeNotFound(_)));
    }

    #[test]
    fn set_instruction_on_national_needs_no_create() {
        let mut store = RuleStore::default();
        store
            .set_instruction(&ScopeKey::National, "bottle", "recycle everywhere")
            .unwrap();
        assert_eq!(
            store.national_default.instruction_for("bottle"),
            Some("recycle everywhere")
        );
    }

    #[test]
    fn reserved_items_route_to_named_fields() {
        let mut store = RuleStore::default();
        let key = scope("state:CA");
        store.create_scope(&key).unwrap();

        store.set_instruction(&key, "company", "CalRecycle").unwrap();
        store.set_instruction(&key, "default", "check locally").unwrap();

        let rules = store.rule_set(&key).unwrap();
        assert_eq!(rules.company.as_deref(), Some("CalRecycle"));
        assert_eq!(rules.default.as_deref(), Some("check locally"));
        // Never stored as ordinary items
        assert!(rules.items.is_empty());
    }

    #[test]
    fn fetched_at_rejected_as_item() {
        let mut store = RuleStore::default();
        let key = scope("state:CA");
        store.create_scope(&key).unwrap();

        let err = store.set_instruction(&key, "_fetched_at", "123").unwrap_err();
        assert_eq!(err, StoreError::ReservedItem("_fetched_at".into()));
    }

    #[test]
    fn remove_instruction_tolerates_absent_item() {
        let mut store = RuleStore::default();
        let key = scope("zip:941");
        store.create_scope(&key).unwrap();

        // Not an error
        store.remove_instruction(&key, "nonexistent").unwrap();
    }

    #[test]
    fn remove_instruction_clears_reserved_fields() {
        let mut store = RuleStore::default();
        let key = scope("zip:94105");
        store.create_scope(&key).unwrap();
        store.set_provider(&key, "Recology").unwrap();

        store.remove_instruction(&key, "company").unwrap();
        assert!(store.rule_set(&key).unwrap().company.is_none());
    }

    #[test]
    fn remove_scope_then_gone() {
        let mut store = RuleStore::default();
        let key = scope("zip:94105");
        store.create_scope(&key).unwrap();
        store.remove_scope(&key).unwrap();

        assert!(!store.contains(&key));
        assert_eq!(
            store.remove_scope(&key).unwrap_err(),
            StoreError::ScopeNotFound("zip:94105".into())
        );
    }

    #[test]
    fn national_cannot_be_removed() {
        let mut store = RuleStore::default();
        assert_eq!(
            store.remove_scope(&ScopeKey::National).unwrap_err(),
            StoreError::NationalImmutable
        );
    }

    #[test]
    fn set_provider_upserts() {
        let mut store = RuleStore::default();
        let key = scope("city:Portland, OR");
        store.create_scope(&key).unwrap();

        store.set_provider(&key, "Metro").unwrap();
        store.set_provider(&key, "Portland Haulers").unwrap();
        assert_eq!(
            store.rule_set(&key).unwrap().company.as_deref(),
            Some("Portland Haulers")
        );
    }

    #[test]
    fn cache_synthesized_overwrites_exact_slot() {
        let mut store = RuleStore::default();
        let code = ZipCode::new("94105").unwrap();

        store.cache_synthesized(&code, RuleSet::with_default("first"));
        store.cache_synthesized(&code, RuleSet::with_default("second"));

        let key = ScopeKey::Zip(ZipKey::Exact(code));
        assert_eq!(
            store.rule_set(&key).unwrap().default.as_deref(),
            Some("second")
        );
    }

    #[test]
    fn missing_partitions_normalize_to_empty_on_load() {
        // A document with only one partition still yields all four
        let store: RuleStore = serde_json::from_str(r#"{"states": {"CA": {}}}"#).unwrap();
        assert!(store.zips.is_empty());
        assert!(store.cities.is_empty());
        assert_eq!(store.states.len(), 1);
        assert!(store.national_default.is_empty());
    }

    #[test]
    fn all_partitions_always_serialized() {
        let json = serde_json::to_value(RuleStore::default()).unwrap();
        for partition in ["zips", "cities", "states", "national_default"] {
            assert!(json.get(partition).is_some(), "missing {partition}");
        }
    }
}
