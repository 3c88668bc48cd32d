//! Request signature verification.

use crate::{
    config::IntegrityConfig,
    error::IntegrityError,
    models::integrity::{SignedRequest, VerificationResult},
    services::replay_guard::{Clock, ReplayGuard, SystemClock},
    utils::{canonical::canonical_payload, hmac::{SharedSecret, verify_signature}},
};
use std::sync::Arc;

/// Verifies signed requests against an injected secret and clock.
///
/// Stateless per request: the only shared state is the immutable secret,
/// so one verifier can serve every worker concurrently.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: SharedSecret,
    replay_guard: ReplayGuard,
    clock: Arc<dyn Clock>,
}

impl SignatureVerifier {
    pub fn new(secret: SharedSecret, replay_guard: ReplayGuard, clock: Arc<dyn Clock>) -> Self {
        Self {
            secret,
            replay_guard,
            clock,
        }
    }

    /// Build a verifier from configuration using the wall clock.
    pub fn from_config(config: &IntegrityConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &IntegrityConfig, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.secret.clone(),
            ReplayGuard::new(config.max_skew_ms),
            clock,
        )
    }

    /// Verify a captured request.
    pub fn verify(&self, request: &SignedRequest) -> VerificationResult {
        self.check(request).into()
    }

    /// Run the checks in order: headers present, timestamp fresh, signature
    /// valid. The first failure wins.
    pub fn check(&self, request: &SignedRequest) -> Result<(), IntegrityError> {
        self.check_headers(request.signature(), request.timestamp())?;
        self.check_signature(request)
    }

    /// Header presence and freshness only.
    ///
    /// Needs nothing from the body, so callers can reject before reading it.
    pub fn check_headers(
        &self,
        signature: Option<&str>,
        timestamp: Option<&str>,
    ) -> Result<(), IntegrityError> {
        let (Some(_), Some(timestamp)) = (signature, timestamp) else {
            return Err(IntegrityError::MissingHeaders);
        };

        self.replay_guard
            .check(timestamp, self.clock.now_millis())
            .map(|_| ())
    }

    /// Compare the signature against the canonical payload. Freshness is
    /// assumed to have passed `check_headers` already.
    pub fn check_signature(&self, request: &SignedRequest) -> Result<(), IntegrityError> {
        let (Some(signature), Some(timestamp)) = (request.signature(), request.timestamp()) else {
            return Err(IntegrityError::MissingHeaders);
        };

        let payload = canonical_payload(request.method(), request.path(), timestamp, request.body());
        if verify_signature(&self.secret, &payload, signature) {
            Ok(())
        } else {
            Err(IntegrityError::InvalidSignature)
        }
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("replay_guard", &self.replay_guard)
            .finish_non_exhaustive()
    }
}
