//! Audit logging data structures for request integrity decisions.

use crate::models::integrity::VerificationResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Structured audit log entry for one integrity decision.
///
/// Emitted on the operator-facing `integrity_audit` target. Never carries
/// the signature, the canonical payload, or the secret.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrityAuditEvent {
    pub outcome: VerificationResult,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub user_agent: Option<String>,
    pub method: String,
    pub endpoint: String,
    pub declared_timestamp: Option<String>,
    pub request_id: Option<String>,
}

impl IntegrityAuditEvent {
    /// Create a new audit event with basic information
    pub fn new(
        outcome: VerificationResult,
        ip_address: String,
        method: String,
        endpoint: String,
    ) -> Self {
        Self {
            outcome,
            timestamp: Utc::now(),
            ip_address,
            user_agent: None,
            method,
            endpoint,
            declared_timestamp: None,
            request_id: None,
        }
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Record the client-declared `X-Timestamp`, useful when chasing clock skew.
    pub fn with_declared_timestamp(mut self, declared: Option<String>) -> Self {
        self.declared_timestamp = declared;
        self
    }

    pub fn with_request_id(mut self, request_id: Option<String>) -> Self {
        self.request_id = request_id;
        self
    }

    /// Log the audit event. Rejections are warnings, acceptances debug.
    pub fn log(&self) {
        if self.outcome.is_accepted() {
            debug!(
                target: "integrity_audit",
                outcome = self.outcome.as_str(),
                ip_address = %self.ip_address,
                method = %self.method,
                endpoint = %self.endpoint,
                request_id = ?self.request_id,
                "Request integrity verified"
            );
        } else {
            warn!(
                target: "integrity_audit",
                outcome = self.outcome.as_str(),
                timestamp = %self.timestamp,
                ip_address = %self.ip_address,
                user_agent = ?self.user_agent,
                method = %self.method,
                endpoint = %self.endpoint,
                declared_timestamp = ?self.declared_timestamp,
                request_id = ?self.request_id,
                "Request integrity rejected"
            );
        }
    }
}
