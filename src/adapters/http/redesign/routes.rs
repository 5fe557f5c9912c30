//! Axum router configuration for the studio endpoints.

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::adapters::http::middleware::identity_middleware;

use super::handlers::{
    ask_assistant, create_redesign, create_session, get_credits, get_current_user, list_projects, list_styles,
    StudioAppState,
};

/// Create the studio API routes.
///
/// # Routes
///
/// ## Public
/// - `POST /sessions` - Open or resume an account
/// - `GET /styles` - Style catalog
/// - `POST /assistant/chat` - Ask the design assistant
///
/// ## Identified (require `X-User-Id`)
/// - `GET /me` - Current account
/// - `GET /credits` - Credit balance
/// - `GET /projects` - Redesign history
/// - `POST /redesigns` - Run one redesign
pub fn studio_routes() -> Router<StudioAppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/styles", get(list_styles))
        .route("/assistant/chat", post(ask_assistant))
        .route("/me", get(get_current_user))
        .route("/credits", get(get_credits))
        .route("/projects", get(list_projects))
        .route("/redesigns", post(create_redesign))
}

/// Create the complete studio router mounted at `/api`, with identity
/// resolution, request tracing, and the upload body limit applied.
pub fn studio_router(state: StudioAppState, max_body_bytes: usize) -> Router {
    Router::new()
        .nest("/api", studio_routes())
        .layer(middleware::from_fn_with_state(
            state.directory.clone(),
            identity_middleware,
        ))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
