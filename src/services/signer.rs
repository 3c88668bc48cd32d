//! Client-side request signing.
//!
//! Produces the `X-Signature` and `X-Timestamp` headers for a request using
//! the same canonicalization the server verifies with.

use crate::{
    services::replay_guard::{Clock, SystemClock},
    utils::{
        canonical::{canonical_path, canonical_payload},
        hmac::{SharedSecret, generate_signature},
    },
};
use std::sync::Arc;

/// Header values for a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeaders {
    pub signature: String,
    pub timestamp: String,
}

/// Signs outgoing requests with a shared secret.
#[derive(Clone)]
pub struct RequestSigner {
    secret: SharedSecret,
    clock: Arc<dyn Clock>,
}

impl RequestSigner {
    pub fn new(secret: SharedSecret) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: SharedSecret, clock: Arc<dyn Clock>) -> Self {
        Self { secret, clock }
    }

    /// Sign at the current time.
    ///
    /// `path_and_query` is what the client puts on the wire after the host,
    /// e.g. `/users?b=2&a=1`. The mount prefix is not part of it.
    pub fn sign(&self, method: &str, path_and_query: &str, body: &[u8]) -> SignatureHeaders {
        self.sign_at(method, path_and_query, body, self.clock.now_millis())
    }

    /// Sign with an explicit timestamp in milliseconds since epoch.
    pub fn sign_at(
        &self,
        method: &str,
        path_and_query: &str,
        body: &[u8],
        timestamp_ms: i64,
    ) -> SignatureHeaders {
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        let path = canonical_path(path, query, "");
        let timestamp = timestamp_ms.to_string();
        let payload = canonical_payload(method, &path, &timestamp, body);

        SignatureHeaders {
            signature: generate_signature(&self.secret, &payload),
            timestamp,
        }
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}
