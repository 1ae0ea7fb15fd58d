//! Service plumbing shared by campus binaries.
//!
//! Health endpoints, request-id middleware, tracing init, and serde
//! helpers. Keep this crate free of domain logic.

pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
