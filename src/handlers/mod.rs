//! HTTP request handlers for API endpoints.
//!
//! The users resource, operator endpoints, and the app factory.

pub mod health;
pub mod metrics;
pub mod openapi;
pub mod users;

pub use health::*;
pub use metrics::*;
pub use openapi::*;
pub use users::*;
