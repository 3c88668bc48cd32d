//! HTTP server binding configuration.

use std::path::Path;

/// Default listening port.
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration for the HTTP listener
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(
            |name| std::env::var(name).ok(),
            Path::new("/.dockerenv").exists(),
        )
    }

    /// Resolve the bind address.
    ///
    /// `BIND_ADDRESS` wins. Otherwise containers bind all interfaces and local
    /// runs bind loopback, both on `PORT`.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>, dockerenv_exists: bool) -> Self {
        if let Some(bind) = lookup("BIND_ADDRESS").filter(|b| !b.trim().is_empty()) {
            return Self {
                bind_address: bind.trim().to_string(),
            };
        }

        let port = lookup("PORT")
            .and_then(|v| v.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let in_container = lookup("KUBERNETES_SERVICE_HOST").is_some()
            || lookup("DOCKER_CONTAINER").is_some()
            || dockerenv_exists;

        let host = if in_container { "0.0.0.0" } else { "127.0.0.1" };
        Self {
            bind_address: format!("{host}:{port}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn local_development_binds_loopback() {
        let config = ServerConfig::from_vars(lookup(&[]), false);
        assert_eq!(config.bind_address, "127.0.0.1:8080");
    }

    #[test]
    fn kubernetes_binds_all_interfaces() {
        let config =
            ServerConfig::from_vars(lookup(&[("KUBERNETES_SERVICE_HOST", "10.0.0.1")]), false);
        assert_eq!(config.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn docker_detected_by_env_or_marker_file() {
        let by_env = ServerConfig::from_vars(lookup(&[("DOCKER_CONTAINER", "true")]), false);
        let by_file = ServerConfig::from_vars(lookup(&[]), true);
        assert_eq!(by_env.bind_address, "0.0.0.0:8080");
        assert_eq!(by_file.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn port_and_override() {
        let with_port = ServerConfig::from_vars(lookup(&[("PORT", "3000")]), false);
        assert_eq!(with_port.bind_address, "127.0.0.1:3000");

        let overridden = ServerConfig::from_vars(
            lookup(&[
                ("KUBERNETES_SERVICE_HOST", "10.0.0.1"),
                ("BIND_ADDRESS", "192.168.1.10:9090"),
            ]),
            true,
        );
        assert_eq!(overridden.bind_address, "192.168.1.10:9090");
    }
}
