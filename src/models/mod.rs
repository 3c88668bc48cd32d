//! Data models and schemas for the Signed Users API.
//!
//! Request/response models for the users resource, the captured request
//! that the integrity layer verifies, and audit types.

pub mod api;
pub mod audit;
pub mod integrity;
pub mod user;

pub use api::*;
pub use audit::*;
pub use integrity::*;
pub use user::*;
