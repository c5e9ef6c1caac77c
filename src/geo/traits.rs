//! geo::traits
//!
//! The external ZIP-to-place capability behind a trait.
//!
//! # Design
//!
//! The geographic database is an external collaborator with no latency or
//! availability guarantees; the core treats it as a black box. The trait
//! is synchronous because the whole resolution model is synchronous
//! request-response. Implementations are read-only: nothing in the geo
//! layer may write the rule store.
//!
//! # Example
//!
//! ```
//! use curbside::core::types::ZipCode;
//! use curbside::geo::{GeoLookup, MockGeo};
//!
//! let geo = MockGeo::new().place("94105", "San Francisco", "California", "CA");
//! let code = ZipCode::new("94105").unwrap();
//!
//! let location = geo.lookup(&code).unwrap().unwrap();
//! assert_eq!(location.city, "San Francisco");
//!
//! // Syntactically valid but unknown codes are Ok(None), not errors
//! let unknown = ZipCode::new("00000").unwrap();
//! assert!(geo.lookup(&unknown).unwrap().is_none());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::{StateAbbr, ZipCode};

/// Errors from geo lookups.
///
/// A code that simply does not exist is *not* an error; implementations
/// report it as `Ok(None)`.
#[derive(Debug, Clone, Error)]
pub enum GeoError {
    /// Network or connection error (including timeouts).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with an unexpected status.
    #[error("geo service error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the service
        message: String,
    },

    /// The service answered 200 but the body was not usable.
    #[error("malformed geo response: {0}")]
    Malformed(String),
}

/// A canonical location record for a resolved ZIP code.
///
/// Derived deterministically from a code; immutable once produced; never
/// persisted into the rule store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// The code this record was resolved from.
    pub zipcode: ZipCode,
    /// Major city or post-office city name.
    pub city: String,
    /// County name, when the backing database knows it.
    pub county: Option<String>,
    /// Full state name.
    pub state: String,
    /// Two-letter state abbreviation.
    pub state_abbr: StateAbbr,
}

/// The external code-to-place capability.
pub trait GeoLookup {
    /// Resolve a syntactically valid code to a location.
    ///
    /// Returns `Ok(None)` when the code does not exist in the backing
    /// database. Callers surface that as an invalid-code rejection,
    /// distinct from "no rules found".
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] for transport or service failures.
    fn lookup(&self, code: &ZipCode) -> Result<Option<Location>, GeoError>;
}
