//! Shared helpers for integration tests.
#![allow(dead_code)]

use actix_web::{http::Method, http::header::ContentType, test};
use signed_users_api::{
    AppConfig, AppState, FixedClock, IntegrityConfig, RequestSigner, SIGNATURE_HEADER,
    SharedSecret, TIMESTAMP_HEADER,
};
use std::sync::Arc;

pub const SECRET: &str = "s3cret";
pub const NOW: i64 = 1_700_000_000_000;

pub fn integrity_config() -> IntegrityConfig {
    IntegrityConfig::new(SharedSecret::new(SECRET).unwrap())
}

/// App state whose verifier sees `now` as the current time.
pub fn state_at(now: i64, integrity: IntegrityConfig) -> AppState {
    AppState::with_clock(AppConfig::with_integrity(integrity), Arc::new(FixedClock(now))).unwrap()
}

pub fn test_state() -> AppState {
    state_at(NOW, integrity_config())
}

pub fn signer() -> RequestSigner {
    RequestSigner::with_clock(SharedSecret::new(SECRET).unwrap(), Arc::new(FixedClock(NOW)))
}

/// Build a request to `/api{path}` signed over `path` and `body`.
pub fn signed_request(method: Method, path: &str, body: &str) -> test::TestRequest {
    let headers = signer().sign(method.as_str(), path, body.as_bytes());
    let req = test::TestRequest::default()
        .method(method)
        .uri(&format!("/api{path}"))
        .insert_header((SIGNATURE_HEADER, headers.signature))
        .insert_header((TIMESTAMP_HEADER, headers.timestamp));

    if body.is_empty() {
        req
    } else {
        req.insert_header(ContentType::json())
            .set_payload(body.to_string())
    }
}
