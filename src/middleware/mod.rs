//! Custom middleware implementations for the API.
//!
//! Request integrity verification, request IDs, and metrics collection.

pub mod integrity;
pub mod metrics;
pub mod request_id;

pub use integrity::*;
pub use metrics::*;
pub use request_id::*;
