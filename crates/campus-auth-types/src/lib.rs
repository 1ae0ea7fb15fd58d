//! Auth types shared across the campus workspace.
//!
//! Provides JWT access-token validation and the `Identity` bearer-token
//! extractor used by every protected route.

pub mod identity;
pub mod token;
