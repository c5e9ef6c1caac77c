//! Property-based tests for the validated key types, the rule set
//! serialization, and the resolution engine's invariants.

use proptest::prelude::*;

use curbside::core::resolve::{resolve_rules, Provenance};
use curbside::core::rules::RuleSet;
use curbside::core::store::RuleStore;
use curbside::core::types::{ScopeKey, StateAbbr, ZipCode, ZipKey};

fn zip_str() -> impl Strategy<Value = String> {
    "[0-9]{5}"
}

fn state_str() -> impl Strategy<Value = String> {
    "[A-Z]{2}"
}

fn city_str() -> impl Strategy<Value = String> {
    "[A-Za-z]{1,12}( [A-Za-z]{1,12})?"
}

fn item_label() -> impl Strategy<Value = String> {
    // Arbitrary short labels, excluding the reserved keys
    "[a-z ]{1,16}".prop_filter("reserved", |s| !RuleSet::is_reserved(s))
}

proptest! {
    #[test]
    fn five_digit_strings_are_valid_codes(s in zip_str()) {
        let code = ZipCode::new(s.clone()).unwrap();
        prop_assert_eq!(code.as_str(), s.as_str());
        let prefix = code.prefix();
        prop_assert_eq!(prefix.as_str(), &s[..3]);
    }

    #[test]
    fn non_five_digit_strings_are_rejected(s in ".*") {
        prop_assume!(s.len() != 5 || !s.chars().all(|c| c.is_ascii_digit()));
        prop_assert!(ZipCode::new(s).is_err());
    }

    #[test]
    fn zip_keys_partition_by_length(s in "[0-9]{3}|[0-9]{5}") {
        let key = ZipKey::parse(&s).unwrap();
        match s.len() {
            3 => prop_assert!(matches!(key, ZipKey::Region(_))),
            5 => prop_assert!(matches!(key, ZipKey::Exact(_))),
            _ => unreachable!(),
        }
        // Serde round trip through the string form
        let json = serde_json::to_string(&key).unwrap();
        let back: ZipKey = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, key);
    }

    #[test]
    fn selectors_round_trip(zip in zip_str(), city in city_str(), state in state_str()) {
        for selector in [
            format!("zip:{zip}"),
            format!("zip:{}", &zip[..3]),
            format!("city:{city}, {state}"),
            format!("state:{state}"),
            "national".to_string(),
        ] {
            let key: ScopeKey = selector.parse().unwrap();
            prop_assert_eq!(key.to_string(), selector);
        }
    }

    #[test]
    fn rule_sets_round_trip_through_json(
        items in proptest::collection::btree_map(item_label(), ".{0,40}", 0..8),
        company in proptest::option::of(".{1,20}"),
        default in proptest::option::of(".{1,40}"),
    ) {
        let rules = RuleSet {
            company,
            default,
            earth911_link: None,
            fetched_at: None,
            items,
        };
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleSet = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, rules);
    }

    #[test]
    fn exact_scope_always_wins(zip in zip_str(), others in proptest::collection::vec(zip_str(), 0..5)) {
        let mut store = RuleStore::default();
        let code = ZipCode::new(zip).unwrap();
        for other in others {
            let other = ZipCode::new(other).unwrap();
            store.cache_synthesized(&other, RuleSet::with_default("theirs"));
        }
        store.cache_synthesized(&code, RuleSet::with_default("mine"));

        let resolution = resolve_rules(&code, None, &store);
        prop_assert_eq!(resolution.provenance, Provenance::Zip(code));
        prop_assert_eq!(resolution.rules.instruction_for("bottle"), Some("mine"));
    }

    #[test]
    fn resolution_is_deterministic_and_total(zip in zip_str(), scoped in zip_str(), state in state_str()) {
        let mut store = RuleStore::default();
        let scoped_key: ScopeKey = format!("zip:{scoped}").parse().unwrap();
        store.create_scope(&scoped_key).unwrap();
        store.create_scope(&ScopeKey::State(StateAbbr::new(state).unwrap())).unwrap();

        let code = ZipCode::new(zip).unwrap();
        let first = resolve_rules(&code, None, &store);
        let second = resolve_rules(&code, None, &store);
        // Always produces a result, and the same one
        prop_assert_eq!(first, second);
    }

    #[test]
    fn store_documents_round_trip(zips in proptest::collection::vec(zip_str(), 0..6), state in state_str()) {
        let mut store = RuleStore::default();
        for zip in zips {
            let code = ZipCode::new(zip).unwrap();
            store.cache_synthesized(&code, RuleSet::with_default("x"));
        }
        store.create_scope(&ScopeKey::State(StateAbbr::new(state).unwrap())).unwrap();

        let json = serde_json::to_string(&store).unwrap();
        let back: RuleStore = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, store);
    }
}
