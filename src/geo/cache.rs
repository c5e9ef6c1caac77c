//! geo::cache
//!
//! Session-scoped memoization for geo lookups.
//!
//! The resolver may cache resolved locations for repeat lookups within a
//! session, but must never persist them into the rule store. This wrapper
//! caches both hits and misses (a code that does not exist will not exist
//! a moment later either); errors are not cached, so a transient network
//! failure does not poison the session.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::core::types::ZipCode;

use super::traits::{GeoError, GeoLookup, Location};

/// A memoizing wrapper around any [`GeoLookup`].
///
/// Uses `RefCell` rather than a lock: the execution model is
/// single-threaded, one resolution at a time.
///
/// # Example
///
/// ```
/// use curbside::core::types::ZipCode;
/// use curbside::geo::{CachingGeo, GeoLookup, MockGeo};
///
/// let geo = CachingGeo::new(MockGeo::new().place("94105", "San Francisco", "California", "CA"));
/// let code = ZipCode::new("94105").unwrap();
///
/// let first = geo.lookup(&code).unwrap();
/// let second = geo.lookup(&code).unwrap();  // served from cache
/// assert_eq!(first, second);
/// ```
pub struct CachingGeo<G> {
    inner: G,
    cache: RefCell<HashMap<ZipCode, Option<Location>>>,
}

impl<G> CachingGeo<G> {
    /// Wrap a geo backend with a session cache.
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }
}

impl<G: GeoLookup> GeoLookup for CachingGeo<G> {
    fn lookup(&self, code: &ZipCode) -> Result<Option<Location>, GeoError> {
        if let Some(cached) = self.cache.borrow().get(code) {
            return Ok(cached.clone());
        }
        let resolved = self.inner.lookup(code)?;
        self.cache
            .borrow_mut()
            .insert(code.clone(), resolved.clone());
        Ok(resolved)
    }
}
