//! Configuration structures and loading utilities.
//!
//! Every section loads from environment variables through a `from_vars`
//! lookup so tests can supply values without touching the process
//! environment.

pub mod integrity;
pub mod logging;
pub mod metrics;
pub mod server;

pub use integrity::*;
pub use logging::*;
pub use metrics::*;
pub use server::*;

use crate::error::ConfigError;

/// Complete application configuration, loaded once at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub integrity: IntegrityConfig,
    pub metrics: MetricsConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Fails when `API_SECRET` is missing or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_env(),
            integrity: IntegrityConfig::from_env()?,
            metrics: MetricsConfig::from_env(),
            logging: LoggingConfig::from_env(),
        })
    }

    /// Configuration with defaults around an explicit integrity setup.
    pub fn with_integrity(integrity: IntegrityConfig) -> Self {
        Self {
            server: ServerConfig::from_vars(|_| None, false),
            integrity,
            metrics: MetricsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
