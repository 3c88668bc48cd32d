//! Signed Users API - a users CRUD API behind an HMAC request-integrity layer
//!
//! Built with Actix Web and Paperclip:
//! - HMAC-SHA256 request signatures over a canonical payload
//! - Timestamp freshness window against replayed requests
//! - Uniform 403 rejections before any handler runs
//! - Prometheus metrics and structured audit logging
//! - OpenAPI documentation of the signing contract
//!
//! ## Architecture
//!
//! - `config/` - Configuration structures and environment loading
//! - `models/` - Users, the captured signed request, and audit events
//! - `services/` - Signature verification, replay guard, signer, user store
//! - `middleware/` - Request integrity, request IDs, metrics
//! - `handlers/` - HTTP handlers and the app factory
//! - `utils/` - Canonical payload, HMAC primitives, request helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use actix_web::HttpServer;
//! use signed_users_api::{AppConfig, AppState, create_app};
//!
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = AppConfig::from_env().expect("API_SECRET must be set");
//!     let state = AppState::new(config).expect("startup failed");
//!     HttpServer::new(move || create_app(&state))
//!         .bind(("127.0.0.1", 8080))?
//!         .run()
//!         .await
//! }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use config::{AppConfig, IntegrityConfig, LoggingConfig, MetricsConfig, ServerConfig};
pub use error::{ApiError, ConfigError, IntegrityError, StartupError};
pub use handlers::{create_app, create_openapi_spec, get_metrics, health};
pub use middleware::{
    MetricsMiddleware, REQUEST_ID_HEADER, RequestId, RequestIdMiddleware, RequestIntegrity,
    UNIFORM_REJECTION_MESSAGE,
};
pub use models::{
    HealthResponse, IntegrityAuditEvent, SIGNATURE_HEADER, Sex, SignedRequest, TIMESTAMP_HEADER,
    User, UserRequest, VerificationResult,
};
pub use services::{
    AppMetrics, Clock, FixedClock, ReplayGuard, RequestSigner, SignatureHeaders,
    SignatureVerifier, SystemClock, UserStore,
};
pub use state::AppState;
pub use utils::{SharedSecret, canonical_path, canonical_payload};
