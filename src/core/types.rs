//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ZipCode`] - Validated 5-digit postal code
//! - [`RegionPrefix`] - Validated 3-digit SCF region prefix
//! - [`ZipKey`] - Key into the `zips` partition (exact code or region prefix)
//! - [`CityKey`] - Validated `"City, ST"` scope key
//! - [`StateAbbr`] - Validated 2-letter state abbreviation
//! - [`Partition`] - One of the four rule-store partitions
//! - [`ScopeKey`] - A typed address for a single scope within a partition
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs. In
//! particular, a 5-digit exact code and a 3-digit region prefix share the
//! `zips` partition on disk; the length disjointness is enforced by
//! [`ZipKey`]'s constructors rather than left as a convention.
//!
//! # Examples
//!
//! ```
//! use curbside::core::types::{CityKey, StateAbbr, ZipCode, ZipKey};
//!
//! // Valid constructions
//! let zip = ZipCode::new("94105").unwrap();
//! assert_eq!(zip.prefix().as_str(), "941");
//!
//! let city = CityKey::parse("Sacramento, CA").unwrap();
//! assert_eq!(city.as_str(), "Sacramento, CA");
//!
//! // Invalid constructions fail at creation time
//! assert!(ZipCode::new("abcde").is_err());
//! assert!(StateAbbr::new("Cal").is_err());
//! assert!(ZipKey::parse("9410").is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid ZIP code: {0}")]
    InvalidZipCode(String),

    #[error("invalid region prefix: {0}")]
    InvalidRegionPrefix(String),

    #[error("invalid city key: {0}")]
    InvalidCityKey(String),

    #[error("invalid state abbreviation: {0}")]
    InvalidStateAbbr(String),

    #[error("invalid scope key: {0}")]
    InvalidScopeKey(String),
}

/// A validated 5-digit postal code.
///
/// Syntactic validity is exactly 5 ASCII digits. Syntactic validity is
/// necessary but not sufficient for a code to name a real place; the geo
/// layer decides the latter.
///
/// # Example
///
/// ```
/// use curbside::core::types::ZipCode;
///
/// let zip = ZipCode::new("94105").unwrap();
/// assert_eq!(zip.as_str(), "94105");
///
/// assert!(ZipCode::new("9410").is_err());
/// assert!(ZipCode::new("941055").is_err());
/// assert!(ZipCode::new("94a05").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZipCode(String);

impl ZipCode {
    /// Create a new validated ZIP code.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidZipCode` unless the input is exactly
    /// 5 ASCII digits.
    pub fn new(code: impl Into<String>) -> Result<Self, TypeError> {
        let code = code.into();
        if code.len() != 5 || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::InvalidZipCode(format!(
                "'{code}' is not a 5-digit code"
            )));
        }
        Ok(Self(code))
    }

    /// The 3-digit SCF region prefix of this code.
    pub fn prefix(&self) -> RegionPrefix {
        // First three chars of a validated 5-digit code are always a
        // valid prefix.
        RegionPrefix(self.0[..3].to_string())
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ZipCode {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ZipCode> for String {
    fn from(code: ZipCode) -> Self {
        code.0
    }
}

impl AsRef<str> for ZipCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated 3-digit region (SCF) prefix.
///
/// Region prefixes name the group of ZIP codes sharing the same first
/// three digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionPrefix(String);

impl RegionPrefix {
    /// Create a new validated region prefix.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidRegionPrefix` unless the input is
    /// exactly 3 ASCII digits.
    pub fn new(prefix: impl Into<String>) -> Result<Self, TypeError> {
        let prefix = prefix.into();
        if prefix.len() != 3 || !prefix.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeError::InvalidRegionPrefix(format!(
                "'{prefix}' is not a 3-digit prefix"
            )));
        }
        Ok(Self(prefix))
    }

    /// Get the prefix as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RegionPrefix {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RegionPrefix> for String {
    fn from(prefix: RegionPrefix) -> Self {
        prefix.0
    }
}

impl std::fmt::Display for RegionPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A key into the `zips` partition.
///
/// The persisted `zips` mapping holds two disjoint tiers under one roof:
/// 5-digit exact codes (tier 1) and 3-digit region prefixes (tier 4).
/// This is safe only because the key lengths differ; `ZipKey` makes that
/// invariant structural instead of conventional.
///
/// # Example
///
/// ```
/// use curbside::core::types::ZipKey;
///
/// assert!(matches!(ZipKey::parse("94105"), Ok(ZipKey::Exact(_))));
/// assert!(matches!(ZipKey::parse("941"), Ok(ZipKey::Region(_))));
/// assert!(ZipKey::parse("9410").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZipKey {
    /// A 5-digit exact code (tier 1).
    Exact(ZipCode),
    /// A 3-digit region prefix (tier 4).
    Region(RegionPrefix),
}

impl ZipKey {
    /// Parse a raw key into the exact or region variant by length.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidScopeKey` if the input is neither a
    /// valid 5-digit code nor a valid 3-digit prefix.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        match raw.len() {
            5 => Ok(ZipKey::Exact(ZipCode::new(raw)?)),
            3 => Ok(ZipKey::Region(RegionPrefix::new(raw)?)),
            _ => Err(TypeError::InvalidScopeKey(format!(
                "'{raw}' must be a 5-digit ZIP code or a 3-digit region prefix"
            ))),
        }
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        match self {
            ZipKey::Exact(code) => code.as_str(),
            ZipKey::Region(prefix) => prefix.as_str(),
        }
    }
}

impl TryFrom<String> for ZipKey {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ZipKey> for String {
    fn from(key: ZipKey) -> Self {
        match key {
            ZipKey::Exact(code) => code.0,
            ZipKey::Region(prefix) => prefix.0,
        }
    }
}

impl std::fmt::Display for ZipKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated 2-letter state abbreviation.
///
/// Abbreviations are normalized to uppercase for consistency.
///
/// # Example
///
/// ```
/// use curbside::core::types::StateAbbr;
///
/// let abbr = StateAbbr::new("ca").unwrap();
/// assert_eq!(abbr.as_str(), "CA");
///
/// assert!(StateAbbr::new("Cal").is_err());
/// assert!(StateAbbr::new("C1").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StateAbbr(String);

impl StateAbbr {
    /// Create a new validated state abbreviation.
    ///
    /// The abbreviation is normalized to uppercase.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidStateAbbr` unless the input is exactly
    /// 2 ASCII letters.
    pub fn new(abbr: impl Into<String>) -> Result<Self, TypeError> {
        let abbr = abbr.into().to_ascii_uppercase();
        if abbr.len() != 2 || !abbr.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TypeError::InvalidStateAbbr(format!(
                "'{abbr}' is not a 2-letter state abbreviation"
            )));
        }
        Ok(Self(abbr))
    }

    /// Get the abbreviation as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StateAbbr {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<StateAbbr> for String {
    fn from(abbr: StateAbbr) -> Self {
        abbr.0
    }
}

impl std::fmt::Display for StateAbbr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated `"City, ST"` scope key.
///
/// The city part must be non-empty and the suffix must be a valid state
/// abbreviation, separated by a literal `", "`.
///
/// # Example
///
/// ```
/// use curbside::core::types::{CityKey, StateAbbr};
///
/// let key = CityKey::parse("San Francisco, CA").unwrap();
/// assert_eq!(key.as_str(), "San Francisco, CA");
///
/// let abbr = StateAbbr::new("NY").unwrap();
/// let built = CityKey::from_parts("New York", &abbr).unwrap();
/// assert_eq!(built.as_str(), "New York, NY");
///
/// assert!(CityKey::parse("Sacramento").is_err());
/// assert!(CityKey::parse(", CA").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityKey(String);

impl CityKey {
    /// Parse a raw `"City, ST"` string into a validated key.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCityKey` if the separator is missing,
    /// the city part is empty, or the suffix is not a valid abbreviation.
    pub fn parse(raw: &str) -> Result<Self, TypeError> {
        let (city, abbr) = raw.rsplit_once(", ").ok_or_else(|| {
            TypeError::InvalidCityKey(format!("'{raw}' must be shaped like 'City, ST'"))
        })?;
        if city.trim().is_empty() {
            return Err(TypeError::InvalidCityKey(
                "city name cannot be empty".into(),
            ));
        }
        let abbr = StateAbbr::new(abbr).map_err(|_| {
            TypeError::InvalidCityKey(format!("'{raw}' must end in a 2-letter state"))
        })?;
        Ok(Self(format!("{city}, {abbr}")))
    }

    /// Build a key from a city name and a state abbreviation.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCityKey` if the city name is empty.
    pub fn from_parts(city: &str, abbr: &StateAbbr) -> Result<Self, TypeError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(TypeError::InvalidCityKey(
                "city name cannot be empty".into(),
            ));
        }
        Ok(Self(format!("{city}, {abbr}")))
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CityKey {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CityKey> for String {
    fn from(key: CityKey) -> Self {
        key.0
    }
}

impl std::fmt::Display for CityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four partitions of the rule store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    /// Exact 5-digit codes and 3-digit region prefixes.
    Zips,
    /// `"City, ST"` scopes.
    Cities,
    /// 2-letter state scopes.
    States,
    /// The single national default scope.
    National,
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Partition::Zips => "zips",
            Partition::Cities => "cities",
            Partition::States => "states",
            Partition::National => "national_default",
        };
        write!(f, "{name}")
    }
}

/// A typed address for a single scope within a partition.
///
/// Scope keys are the unit of addressing for all mutation operations.
/// The CLI selector syntax is `zip:94105`, `zip:941`, `city:City, ST`,
/// `state:CA`, or the bare word `national`.
///
/// # Example
///
/// ```
/// use curbside::core::types::{Partition, ScopeKey};
///
/// let key: ScopeKey = "zip:94105".parse().unwrap();
/// assert_eq!(key.partition(), Partition::Zips);
///
/// let key: ScopeKey = "city:Sacramento, CA".parse().unwrap();
/// assert_eq!(key.to_string(), "city:Sacramento, CA");
///
/// let key: ScopeKey = "national".parse().unwrap();
/// assert_eq!(key.partition(), Partition::National);
///
/// assert!("zip:9410".parse::<ScopeKey>().is_err());
/// assert!("94105".parse::<ScopeKey>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKey {
    /// A scope in the `zips` partition.
    Zip(ZipKey),
    /// A scope in the `cities` partition.
    City(CityKey),
    /// A scope in the `states` partition.
    State(StateAbbr),
    /// The national default scope.
    National,
}

impl ScopeKey {
    /// Parse a raw key string for the given partition, enforcing the
    /// partition's key-shape invariant.
    ///
    /// The national partition takes no key; pass `None`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidScopeKey` if the key fails the shape
    /// invariant, is missing, or is supplied for the national partition.
    pub fn parse(partition: Partition, raw: Option<&str>) -> Result<Self, TypeError> {
        match (partition, raw) {
            (Partition::National, None) => Ok(ScopeKey::National),
            (Partition::National, Some(extra)) => Err(TypeError::InvalidScopeKey(format!(
                "the national default takes no key (got '{extra}')"
            ))),
            (_, None) => Err(TypeError::InvalidScopeKey(format!(
                "partition '{partition}' requires a key"
            ))),
            (Partition::Zips, Some(raw)) => Ok(ScopeKey::Zip(ZipKey::parse(raw)?)),
            (Partition::Cities, Some(raw)) => Ok(ScopeKey::City(CityKey::parse(raw)?)),
            (Partition::States, Some(raw)) => Ok(ScopeKey::State(StateAbbr::new(raw)?)),
        }
    }

    /// The partition this key addresses.
    pub fn partition(&self) -> Partition {
        match self {
            ScopeKey::Zip(_) => Partition::Zips,
            ScopeKey::City(_) => Partition::Cities,
            ScopeKey::State(_) => Partition::States,
            ScopeKey::National => Partition::National,
        }
    }
}

impl std::str::FromStr for ScopeKey {
    type Err = TypeError;

    /// Parse a CLI scope selector: `zip:<key>`, `city:<key>`,
    /// `state:<key>`, or `national`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "national" {
            return Ok(ScopeKey::National);
        }
        let (prefix, raw) = s.split_once(':').ok_or_else(|| {
            TypeError::InvalidScopeKey(format!(
                "'{s}' must be 'zip:<key>', 'city:<key>', 'state:<key>', or 'national'"
            ))
        })?;
        match prefix {
            "zip" => Ok(ScopeKey::Zip(ZipKey::parse(raw)?)),
            "city" => Ok(ScopeKey::City(CityKey::parse(raw)?)),
            "state" => Ok(ScopeKey::State(StateAbbr::new(raw)?)),
            other => Err(TypeError::InvalidScopeKey(format!(
                "unknown partition prefix '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for ScopeKey {
    /// Mirrors the selector syntax accepted by `FromStr`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeKey::Zip(key) => write!(f, "zip:{key}"),
            ScopeKey::City(key) => write!(f, "city:{key}"),
            ScopeKey::State(abbr) => write!(f, "state:{abbr}"),
            ScopeKey::National => write!(f, "national"),
        }
    }
}
