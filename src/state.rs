//! Shared application state built once at startup.

use crate::{
    config::AppConfig,
    error::StartupError,
    services::{AppMetrics, Clock, SignatureVerifier, SystemClock, UserStore},
};
use actix_web::web;
use std::sync::Arc;

/// Components shared by every worker.
///
/// Built once in `main` and cloned into each worker's `App`, so the user
/// store and metrics registry are process-wide.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub verifier: SignatureVerifier,
    pub users: web::Data<UserStore>,
    pub metrics: web::Data<AppMetrics>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, StartupError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build state with an injected clock for the freshness check.
    pub fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self, StartupError> {
        let verifier = SignatureVerifier::with_clock(&config.integrity, clock);
        let metrics = AppMetrics::new()?;

        Ok(Self {
            config,
            verifier,
            users: web::Data::new(UserStore::new()),
            metrics: web::Data::new(metrics),
        })
    }
}
