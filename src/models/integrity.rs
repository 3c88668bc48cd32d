//! Request integrity data structures.

use crate::error::IntegrityError;
use actix_web::web::Bytes;
use serde::Serialize;

/// Header carrying the hex-encoded HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "X-Signature";

/// Header carrying the client-declared timestamp in milliseconds since epoch.
pub const TIMESTAMP_HEADER: &str = "X-Timestamp";

/// A request as captured from the wire, ready for verification.
///
/// Fields are private and only readable, so the values that were
/// canonicalized are the values that were verified.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    method: String,
    path: String,
    timestamp: Option<String>,
    body: Bytes,
    signature: Option<String>,
}

impl SignedRequest {
    /// Capture a request. `path` must already be canonical.
    pub fn new(method: &str, path: impl Into<String>, body: Bytes) -> Self {
        Self {
            method: method.to_ascii_uppercase(),
            path: path.into(),
            timestamp: None,
            body,
            signature: None,
        }
    }

    /// Attach the raw `X-Timestamp` header text.
    pub fn with_timestamp(mut self, timestamp: Option<impl Into<String>>) -> Self {
        self.timestamp = timestamp.map(Into::into);
        self
    }

    /// Attach the raw `X-Signature` header text.
    pub fn with_signature(mut self, signature: Option<impl Into<String>>) -> Self {
        self.signature = signature.map(Into::into);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }
}

/// Outcome of verifying one request. Exactly one per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationResult {
    Accepted,
    RejectedMissingHeaders,
    RejectedExpired,
    RejectedInvalidSignature,
}

impl VerificationResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerificationResult::Accepted)
    }

    /// The failure behind a rejection, or `None` when accepted.
    pub fn rejection(&self) -> Option<IntegrityError> {
        match self {
            VerificationResult::Accepted => None,
            VerificationResult::RejectedMissingHeaders => Some(IntegrityError::MissingHeaders),
            VerificationResult::RejectedExpired => Some(IntegrityError::Expired),
            VerificationResult::RejectedInvalidSignature => Some(IntegrityError::InvalidSignature),
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn as_str(&self) -> &'static str {
        self.rejection().map_or("accepted", |error| error.as_str())
    }
}

impl From<Result<(), IntegrityError>> for VerificationResult {
    fn from(result: Result<(), IntegrityError>) -> Self {
        match result {
            Ok(()) => VerificationResult::Accepted,
            Err(IntegrityError::MissingHeaders) => VerificationResult::RejectedMissingHeaders,
            Err(IntegrityError::Expired) => VerificationResult::RejectedExpired,
            Err(IntegrityError::InvalidSignature) => VerificationResult::RejectedInvalidSignature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_uppercased_on_capture() {
        let req = SignedRequest::new("post", "/users", Bytes::new());
        assert_eq!(req.method(), "POST");
    }

    #[test]
    fn missing_headers_stay_absent() {
        let req = SignedRequest::new("GET", "/users", Bytes::new())
            .with_timestamp(None::<String>)
            .with_signature(Some("abc"));
        assert_eq!(req.timestamp(), None);
        assert_eq!(req.signature(), Some("abc"));
    }

    #[test]
    fn result_and_error_convert_both_ways() {
        for error in [
            IntegrityError::MissingHeaders,
            IntegrityError::Expired,
            IntegrityError::InvalidSignature,
        ] {
            let result = VerificationResult::from(Err(error));
            assert!(!result.is_accepted());
            assert_eq!(result.rejection(), Some(error));
            assert_eq!(result.as_str(), error.as_str());
        }

        let accepted = VerificationResult::from(Ok(()));
        assert!(accepted.is_accepted());
        assert_eq!(accepted.rejection(), None);
        assert_eq!(accepted.as_str(), "accepted");
    }
}
