//! HMAC-SHA256 signing and constant-time verification.

use crate::error::ConfigError;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Shared HMAC key known to both client and server.
///
/// The key is absorbed into a keyed MAC state once; each signature clones
/// that state. The raw bytes are not retained and `Debug` is redacted.
#[derive(Clone)]
pub struct SharedSecret {
    keyed: HmacSha256,
}

impl SharedSecret {
    /// Build a secret from raw key bytes. Empty keys are rejected.
    pub fn new(key: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let key = key.as_ref();
        if key.is_empty() {
            return Err(ConfigError::EmptySecret);
        }

        let keyed = HmacSha256::new_from_slice(key).map_err(|_| ConfigError::InvalidSecret)?;
        Ok(Self { keyed })
    }

    fn mac(&self) -> HmacSha256 {
        self.keyed.clone()
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(<redacted>)")
    }
}

/// Generate the lowercase hex HMAC-SHA256 signature of `payload`.
pub fn generate_signature(secret: &SharedSecret, payload: &[u8]) -> String {
    let mut mac = secret.mac();
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a client-supplied hex signature against `payload`.
///
/// The tag comparison is constant time. Malformed hex and tags of the wrong
/// length are plain mismatches.
pub fn verify_signature(secret: &SharedSecret, payload: &[u8], signature: &str) -> bool {
    let Ok(provided) = hex::decode(signature) else {
        return false;
    };

    let mut mac = secret.mac();
    mac.update(payload);
    mac.verify_slice(&provided).is_ok()
}
