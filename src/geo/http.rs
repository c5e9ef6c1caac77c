//! geo::http
//!
//! HTTP-backed geo lookup against the Zippopotam.us API.
//!
//! # Wire format
//!
//! `GET {endpoint}/us/{code}` answers `200` with a document like:
//!
//! ```json
//! {
//!   "post code": "94105",
//!   "places": [
//!     {
//!       "place name": "San Francisco",
//!       "state": "California",
//!       "state abbreviation": "CA"
//!     }
//!   ]
//! }
//! ```
//!
//! and `404` for codes that do not exist. The API does not report a
//! county, so `Location::county` is always `None` from this backend.

use std::time::Duration;

use serde::Deserialize;

use crate::core::types::{StateAbbr, ZipCode};

use super::traits::{GeoError, GeoLookup, Location};

/// Default public endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.zippopotam.us";

/// Request timeout. No retries are built in; a timeout is reported as a
/// resolver failure like any other network error.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Geo lookup backed by the Zippopotam.us HTTP API.
pub struct ZippopotamGeo {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl ZippopotamGeo {
    /// Create a client against the default public endpoint.
    ///
    /// # Errors
    ///
    /// Returns `GeoError::Network` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, GeoError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Create a client against a custom endpoint (configurable for
    /// self-hosted mirrors and for tests).
    ///
    /// # Errors
    ///
    /// Returns `GeoError::Network` if the HTTP client cannot be built.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, GeoError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GeoError::Network(e.to_string()))?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ZipResponse {
    places: Vec<PlaceEntry>,
}

#[derive(Debug, Deserialize)]
struct PlaceEntry {
    #[serde(rename = "place name")]
    place_name: String,
    state: String,
    #[serde(rename = "state abbreviation")]
    state_abbreviation: String,
}

/// Convert a parsed response into a canonical location record.
fn location_from_response(code: &ZipCode, response: ZipResponse) -> Result<Location, GeoError> {
    let place = response
        .places
        .into_iter()
        .next()
        .ok_or_else(|| GeoError::Malformed(format!("no places listed for {code}")))?;
    let state_abbr = StateAbbr::new(&place.state_abbreviation)
        .map_err(|e| GeoError::Malformed(e.to_string()))?;
    Ok(Location {
        zipcode: code.clone(),
        city: place.place_name,
        county: None,
        state: place.state,
        state_abbr,
    })
}

impl GeoLookup for ZippopotamGeo {
    fn lookup(&self, code: &ZipCode) -> Result<Option<Location>, GeoError> {
        let url = format!("{}/us/{}", self.endpoint, code);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| GeoError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(GeoError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("unexpected status").into(),
            });
        }

        let parsed: ZipResponse = response
            .json()
            .map_err(|e| GeoError::Malformed(e.to_string()))?;
        location_from_response(code, parsed).map(Some)
    }
}
