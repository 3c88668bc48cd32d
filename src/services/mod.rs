//! Business logic and service layer modules.
//!
//! Signature verification and its freshness guard, the client-side signer,
//! metrics collection, and the user store behind the API.

pub mod integrity;
pub mod metrics;
pub mod replay_guard;
pub mod signer;
pub mod users;

pub use integrity::*;
pub use metrics::*;
pub use replay_guard::*;
pub use signer::*;
pub use users::*;
