//! core::config::schema
//!
//! Configuration file schema.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Global configuration (`~/.curbside/config.toml`).
///
/// Unknown fields are rejected so a typo fails loudly instead of being
/// silently ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalConfig {
    /// Override the rules-file location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Geo lookup settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoConfig>,
}

/// Settings for the external geo service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeoConfig {
    /// Endpoint of the ZIP-to-place API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Skip the geo service entirely (city/state tiers become
    /// unreachable).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offline: Option<bool>,
}

impl GlobalConfig {
    /// Validate loaded values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an endpoint that is not
    /// an HTTP(S) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(endpoint) = self.geo.as_ref().and_then(|g| g.endpoint.as_deref()) {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue(format!(
                    "geo.endpoint must be an http(s) URL, got '{endpoint}'"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_is_valid() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert!(config.validate().is_ok());
        assert!(config.store_path.is_none());
    }

    #[test]
    fn full_config_parses() {
        let config: GlobalConfig = toml::from_str(
            r#"
            store_path = "/var/lib/curbside/rules.json"

            [geo]
            endpoint = "https://geo.internal.example"
            offline = false
            "#,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(
            config.geo.as_ref().unwrap().endpoint.as_deref(),
            Some("https://geo.internal.example")
        );
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<GlobalConfig, _> = toml::from_str("store_pth = \"oops\"");
        assert!(result.is_err());
    }

    #[test]
    fn non_http_endpoint_rejected() {
        let config: GlobalConfig = toml::from_str(
            r#"
            [geo]
            endpoint = "ftp://geo.example"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
