//! Utility functions and helper modules.
//!
//! Request-inspection helpers, the canonical payload builder, and the HMAC
//! primitives used by both the verifier and the client-side signer.

pub mod canonical;
pub mod hmac;
pub mod http;
pub mod route;

pub use canonical::*;
pub use hmac::{SharedSecret, generate_signature, verify_signature};
pub use http::*;
pub use route::*;
