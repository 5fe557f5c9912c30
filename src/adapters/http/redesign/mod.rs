//! Studio HTTP adapter - sessions, credits, history, styles, and redesign runs.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::StudioAppState;
pub use routes::{studio_router, studio_routes};
