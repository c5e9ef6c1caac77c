//! geo
//!
//! Location resolution: the external ZIP-to-place capability.
//!
//! The rest of the crate consumes this layer through the [`GeoLookup`]
//! trait only. [`ZippopotamGeo`] is the HTTP backend, [`MockGeo`] the
//! deterministic in-memory one, and [`CachingGeo`] wraps either with a
//! session cache.

mod cache;
mod http;
mod mock;
mod traits;

pub use cache::CachingGeo;
pub use http::{ZippopotamGeo, DEFAULT_ENDPOINT};
pub use mock::MockGeo;
pub use traits::{GeoError, GeoLookup, Location};
