//! HTTP adapters - REST API implementations.

pub mod error;
pub mod middleware;
pub mod redesign;

pub use error::{ApiError, ErrorResponse};
pub use redesign::{studio_router, StudioAppState};
