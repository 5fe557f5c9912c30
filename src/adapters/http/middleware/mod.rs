//! HTTP middleware for axum.
//!
//! - `identity` - Resolves the upstream caller id to an account

pub mod identity;

pub use identity::{
    identity_middleware, IdentityRejection, IdentityState, RequireUser, USER_ID_HEADER,
};
