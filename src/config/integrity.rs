//! Request integrity configuration.

use crate::{error::ConfigError, utils::hmac::SharedSecret};

/// Default freshness window in milliseconds.
pub const DEFAULT_MAX_SKEW_MS: u64 = 60_000;

/// Default mount prefix that clients never include in the signed path.
pub const DEFAULT_ROUTE_PREFIX: &str = "/api";

/// Operator endpoints served without integrity checks, relative to the prefix.
const UNSIGNED_ENDPOINTS: [&str; 3] = ["/health", "/metrics", "/spec/v2"];

/// Exact paths that bypass verification under the given mount prefix.
pub fn default_bypass_paths(route_prefix: &str) -> Vec<String> {
    UNSIGNED_ENDPOINTS
        .iter()
        .map(|endpoint| format!("{route_prefix}{endpoint}"))
        .collect()
}

/// Configuration for request signature and freshness validation
#[derive(Clone, Debug)]
pub struct IntegrityConfig {
    pub secret: SharedSecret,
    pub max_skew_ms: u64,
    pub route_prefix: String,
    pub uniform_rejections: bool,
    pub bypass_paths: Vec<String>,
}

impl IntegrityConfig {
    /// Configuration with defaults around an explicit secret.
    pub fn new(secret: SharedSecret) -> Self {
        Self {
            secret,
            max_skew_ms: DEFAULT_MAX_SKEW_MS,
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            uniform_rejections: true,
            bypass_paths: default_bypass_paths(DEFAULT_ROUTE_PREFIX),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`.
    ///
    /// `API_SECRET` is mandatory. An unparsable `INTEGRITY_MAX_SKEW_MS` is an
    /// error rather than a silent fallback, so the window is never widened
    /// by accident.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("API_SECRET").ok_or(ConfigError::MissingSecret)?;
        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        let mut config = Self::new(SharedSecret::new(secret.as_bytes())?);

        if let Some(value) = lookup("INTEGRITY_MAX_SKEW_MS") {
            config.max_skew_ms = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "INTEGRITY_MAX_SKEW_MS",
                value,
            })?;
        }

        if let Some(prefix) = lookup("API_ROUTE_PREFIX") {
            config.route_prefix = prefix.trim().trim_end_matches('/').to_string();
            config.bypass_paths = default_bypass_paths(&config.route_prefix);
        }

        config.uniform_rejections = lookup("INTEGRITY_UNIFORM_REJECTIONS")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        if let Some(paths) = lookup("INTEGRITY_BYPASS_PATHS") {
            config.bypass_paths = paths
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = IntegrityConfig::from_vars(vars(&[]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn blank_secret_is_an_error() {
        let result = IntegrityConfig::from_vars(vars(&[("API_SECRET", "   ")]));
        assert!(matches!(result, Err(ConfigError::EmptySecret)));
    }

    #[test]
    fn defaults_apply() {
        let config = IntegrityConfig::from_vars(vars(&[("API_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.max_skew_ms, 60_000);
        assert_eq!(config.route_prefix, "/api");
        assert!(config.uniform_rejections);
        assert_eq!(config.bypass_paths, vec!["/api/health", "/api/metrics", "/api/spec/v2"]);
    }

    #[test]
    fn overrides_apply() {
        let config = IntegrityConfig::from_vars(vars(&[
            ("API_SECRET", "s3cret"),
            ("INTEGRITY_MAX_SKEW_MS", "30000"),
            ("API_ROUTE_PREFIX", "/v1/"),
            ("INTEGRITY_UNIFORM_REJECTIONS", "FALSE"),
            ("INTEGRITY_BYPASS_PATHS", "/v1/health, ,/v1/metrics"),
        ]))
        .unwrap();
        assert_eq!(config.max_skew_ms, 30_000);
        assert_eq!(config.route_prefix, "/v1");
        assert!(!config.uniform_rejections);
        assert_eq!(config.bypass_paths, vec!["/v1/health", "/v1/metrics"]);
    }

    #[test]
    fn bypass_paths_follow_prefix() {
        let config = IntegrityConfig::from_vars(vars(&[
            ("API_SECRET", "s3cret"),
            ("API_ROUTE_PREFIX", "/v2"),
        ]))
        .unwrap();
        assert_eq!(config.bypass_paths, vec!["/v2/health", "/v2/metrics", "/v2/spec/v2"]);
    }

    #[test]
    fn invalid_skew_is_an_error() {
        let result = IntegrityConfig::from_vars(vars(&[
            ("API_SECRET", "s3cret"),
            ("INTEGRITY_MAX_SKEW_MS", "a minute"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "INTEGRITY_MAX_SKEW_MS", .. })
        ));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let config = IntegrityConfig::from_vars(vars(&[("API_SECRET", "s3cret")])).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
