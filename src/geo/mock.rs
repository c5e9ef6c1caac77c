//! geo::mock
//!
//! In-memory geo lookup for tests and offline use.

use std::collections::HashMap;

use crate::core::types::{StateAbbr, ZipCode};

use super::traits::{GeoError, GeoLookup, Location};

/// A deterministic in-memory ZIP-to-place table.
///
/// Codes not in the table resolve to `Ok(None)`, the same shape a real
/// backend uses for codes that do not exist.
///
/// # Example
///
/// ```
/// use curbside::core::types::ZipCode;
/// use curbside::geo::{GeoLookup, MockGeo};
///
/// let geo = MockGeo::new()
///     .place("95825", "Sacramento", "California", "CA")
///     .place("10001", "New York", "New York", "NY");
///
/// let loc = geo.lookup(&ZipCode::new("10001").unwrap()).unwrap().unwrap();
/// assert_eq!(loc.state_abbr.as_str(), "NY");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockGeo {
    places: HashMap<ZipCode, Location>,
}

impl MockGeo {
    /// Create an empty mock (every code is unknown).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a place, builder-style.
    ///
    /// # Panics
    ///
    /// Panics on an invalid code or state abbreviation; the mock is test
    /// infrastructure and bad fixtures should fail loudly.
    pub fn place(mut self, code: &str, city: &str, state: &str, abbr: &str) -> Self {
        let zipcode = ZipCode::new(code).expect("valid fixture ZIP code");
        let state_abbr = StateAbbr::new(abbr).expect("valid fixture state abbreviation");
        self.places.insert(
            zipcode.clone(),
            Location {
                zipcode,
                city: city.to_string(),
                county: None,
                state: state.to_string(),
                state_abbr,
            },
        );
        self
    }
}

impl GeoLookup for MockGeo {
    fn lookup(&self, code: &ZipCode) -> Result<Option<Location>, GeoError> {
        Ok(self.places.get(code).cloned())
    }
}
