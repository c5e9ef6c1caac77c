//! core::resolve
//!
//! The tiered resolution engine.
//!
//! # Fallback order
//!
//! Tiers are tried strictly in order; the first hit wins:
//!
//! 1. Exact 5-digit code in `zips`
//! 2. `"City, ST"` of the resolved location in `cities`
//! 3. State abbreviation of the resolved location in `states`
//! 4. 3-digit region prefix of the code in `zips`
//! 5. The national default (always matches, possibly empty)
//!
//! The order is data ([`Tier::ORDER`]), not control flow: each tier is an
//! explicit function returning an optional match and the engine takes the
//! first success. When no location is available (the code could not be
//! resolved to a place), tiers 2 and 3 are skipped entirely and
//! resolution proceeds from tier 1 to tier 4.
//!
//! # Purity
//!
//! For a fixed store, code, and location the result and its provenance
//! label are pure: the engine never mutates the store and consults no
//! clock or randomness.
//!
//! # Example
//!
//! ```
//! use curbside::core::resolve::resolve_rules;
//! use curbside::core::store::RuleStore;
//! use curbside::core::types::{ScopeKey, ZipCode};
//!
//! let mut store = RuleStore::default();
//! let scope: ScopeKey = "zip:94105".parse().unwrap();
//! store.create_scope(&scope).unwrap();
//!
//! let code = ZipCode::new("94105").unwrap();
//! let resolution = resolve_rules(&code, None, &store);
//! assert_eq!(resolution.provenance.to_string(), "ZIP 94105");
//! ```

use serde::Serialize;

use crate::geo::Location;

use super::rules::RuleSet;
use super::store::RuleStore;
use super::types::{CityKey, RegionPrefix, StateAbbr, ZipCode, ZipKey};

/// Which tier satisfied a resolution, carrying the matched key.
///
/// The `Display` impl produces the human-readable provenance label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Tier 1: exact code match.
    Zip(ZipCode),
    /// Tier 2: city-level match.
    City(CityKey),
    /// Tier 3: state-level match.
    State(StateAbbr),
    /// Tier 4: region-prefix match.
    Region(RegionPrefix),
    /// Tier 5: the national default.
    National,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Zip(code) => write!(f, "ZIP {code}"),
            Provenance::City(key) => write!(f, "{key}"),
            Provenance::State(abbr) => write!(f, "{abbr} (state-level)"),
            Provenance::Region(prefix) => write!(f, "region {prefix}xx"),
            Provenance::National => write!(f, "national default"),
        }
    }
}

impl Serialize for Provenance {
    /// Serializes as the provenance label, for machine-readable output.
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The outcome of a resolution: the applicable rules and where they came
/// from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// The applicable rule set (cloned out of the store).
    pub rules: RuleSet,
    /// Which tier satisfied the lookup.
    pub provenance: Provenance,
}

/// One fallback level in the resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Exact 5-digit code.
    Exact,
    /// City of the resolved location.
    City,
    /// State of the resolved location.
    State,
    /// 3-digit region prefix.
    Region,
    /// National default.
    National,
}

impl Tier {
    /// The fallback order. This array *is* the resolution policy.
    pub const ORDER: [Tier; 5] = [
        Tier::Exact,
        Tier::City,
        Tier::State,
        Tier::Region,
        Tier::National,
    ];

    /// Try this tier alone. Returns `None` when the tier has no match or
    /// (for city/state) when no location is available.
    pub fn lookup(
        self,
        code: &ZipCode,
        location: Option<&Location>,
        store: &RuleStore,
    ) -> Option<Resolution> {
        match self {
            Tier::Exact => {
                let key = ZipKey::Exact(code.clone());
                store.zips.get(&key).map(|rules| Resolution {
                    rules: rules.clone(),
                    provenance: Provenance::Zip(code.clone()),
                })
            }
            Tier::City => {
                let location = location?;
                let key = CityKey::from_parts(&location.city, &location.state_abbr).ok()?;
                store.cities.get(&key).map(|rules| Resolution {
                    rules: rules.clone(),
                    provenance: Provenance::City(key.clone()),
                })
            }
            Tier::State => {
                let abbr = &location?.state_abbr;
                store.states.get(abbr).map(|rules| Resolution {
                    rules: rules.clone(),
                    provenance: Provenance::State(abbr.clone()),
                })
            }
            Tier::Region => {
                let prefix = code.prefix();
                let key = ZipKey::Region(prefix.clone());
                store.zips.get(&key).map(|rules| Resolution {
                    rules: rules.clone(),
                    provenance: Provenance::Region(prefix),
                })
            }
            Tier::National => Some(Resolution {
                rules: store.national_default.clone(),
                provenance: Provenance::National,
            }),
        }
    }
}

/// Resolve the applicable rule set for a code.
///
/// Pass the location resolved for the code, or `None` when the code could
/// not be resolved to a place (tiers 2 and 3 are then skipped). Always
/// produces a result: the national default matches unconditionally.
pub fn resolve_rules(
    code: &ZipCode,
    location: Option<&Location>,
    store: &RuleStore,
) -> Resolution {
    Tier::ORDER
        .iter()
        .find_map(|tier| tier.lookup(code, location, store))
        .unwrap_or_else(|| Resolution {
            rules: store.national_default.clone(),
            provenance: Provenance::National,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ScopeKey;
    use crate::geo::{GeoLookup, MockGeo};

    fn location_for(geo: &MockGeo, code: &ZipCode) -> Option<Location> {
        geo.lookup(code).unwrap()
    }

    fn store_with(selectors: &[&str]) -> RuleStore {
        let mut store = RuleStore::default();
        for selector in selectors {
            let key: ScopeKey = selector.parse().unwrap();
            store.create_scope(&key).unwrap();
        }
        store
    }

    fn sf_geo() -> MockGeo {
        MockGeo::new()
            .place("94105", "San Francisco", "California", "CA")
            .place("94104", "San Francisco", "California", "CA")
            .place("95825", "Sacramento", "California", "CA")
    }

    #[test]
    fn exact_beats_city_and_state() {
        let mut store = store_with(&["zip:94105", "city:San Francisco, CA", "state:CA"]);
        store
            .set_instruction(&"zip:94105".parse().unwrap(), "bottle", "X")
            .unwrap();

        let code = ZipCode::new("94105").unwrap();
        let location = location_for(&sf_geo(), &code);
        let resolution = resolve_rules(&code, location.as_ref(), &store);

        assert_eq!(resolution.provenance.to_string(), "ZIP 94105");
        assert_eq!(resolution.rules.instruction_for("bottle"), Some("X"));
    }

    #[test]
    fn city_when_no_exact() {
        let store = store_with(&["city:San Francisco, CA", "state:CA"]);

        let code = ZipCode::new("94104").unwrap();
        let location = location_for(&sf_geo(), &code);
        let resolution = resolve_rules(&code, location.as_ref(), &store);

        assert_eq!(resolution.provenance.to_string(), "San Francisco, CA");
    }

    #[test]
    fn state_when_no_city() {
        let store = store_with(&["state:CA"]);

        let code = ZipCode::new("95825").unwrap();
        let location = location_for(&sf_geo(), &code);
        let resolution = resolve_rules(&code, location.as_ref(), &store);

        assert_eq!(resolution.provenance.to_string(), "CA (state-level)");
    }

    #[test]
    fn region_prefix_when_no_state() {
        let store = store_with(&["zip:958"]);

        let code = ZipCode::new("95825").unwrap();
        let location = location_for(&sf_geo(), &code);
        let resolution = resolve_rules(&code, location.as_ref(), &store);

        assert_eq!(resolution.provenance.to_string(), "region 958xx");
    }

    #[test]
    fn national_default_for_empty_store() {
        let store = RuleStore::default();
        let code = ZipCode::new("99999").unwrap();

        let resolution = resolve_rules(&code, None, &store);

        assert_eq!(resolution.provenance, Provenance::National);
        assert_eq!(resolution.provenance.to_string(), "national default");
        assert!(resolution.rules.is_empty());
    }

    #[test]
    fn no_location_skips_city_and_state() {
        // City and state scopes exist, but without a location only
        // tiers 1, 4, 5 are reachable.
        let store = store_with(&["city:San Francisco, CA", "state:CA", "zip:941"]);

        let code = ZipCode::new("94104").unwrap();
        let resolution = resolve_rules(&code, None, &store);

        assert_eq!(resolution.provenance.to_string(), "region 941xx");
    }

    #[test]
    fn no_location_still_matches_exact() {
        let store = store_with(&["zip:94105"]);
        let code = ZipCode::new("94105").unwrap();

        let resolution = resolve_rules(&code, None, &store);
        assert_eq!(resolution.provenance.to_string(), "ZIP 94105");
    }

    #[test]
    fn exact_and_region_keys_never_collide() {
        // "941" as region and "94105" as exact live in the same partition
        let store = store_with(&["zip:941", "zip:94105"]);

        let exact = ZipCode::new("94105").unwrap();
        let neighbor = ZipCode::new("94110").unwrap();

        assert_eq!(
            resolve_rules(&exact, None, &store).provenance.to_string(),
            "ZIP 94105"
        );
        assert_eq!(
            resolve_rules(&neighbor, None, &store).provenance.to_string(),
            "region 941xx"
        );
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let store = store_with(&["state:CA"]);
        let code = ZipCode::new("95825").unwrap();
        let location = location_for(&sf_geo(), &code);

        let first = resolve_rules(&code, location.as_ref(), &store);
        let second = resolve_rules(&code, location.as_ref(), &store);
        assert_eq!(first, second);
    }

    #[test]
    fn engine_never_mutates_store() {
        let store = store_with(&["zip:94105"]);
        let before = store.clone();

        let code = ZipCode::new("99999").unwrap();
        let _ = resolve_rules(&code, None, &store);

        assert_eq!(store, before);
    }

    #[test]
    fn provenance_serializes_as_label() {
        let json = serde_json::to_string(&Provenance::Region(
            ZipCode::new("95825").unwrap().prefix(),
        ))
        .unwrap();
        assert_eq!(json, "\"region 958xx\"");
    }
}
