//! Caller identity middleware and extractors for axum.
//!
//! Authentication happens upstream. The gateway forwards the authenticated
//! user's id in the `X-User-Id` header; this layer resolves it to an account.
//!
//! ```text
//! Request → identity_middleware → injects UserAccount into extensions
//!                                          ↓
//!                                  Handler → RequireUser extractor reads it
//! ```
//!
//! - No header: the request continues without an account, so public routes
//!   (styles, session creation) work. `RequireUser` then answers 401.
//! - Header naming an unknown user: 401 immediately.
//! - Directory unreachable: 503.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::account::{DirectoryError, UserAccount};
use crate::domain::foundation::UserId;
use crate::ports::AccountDirectory;

use crate::adapters::http::error::ErrorResponse;

/// Header carrying the upstream-authenticated user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// Identity middleware state - wraps the account directory.
pub type IdentityState = Arc<dyn AccountDirectory>;

pub async fn identity_middleware(
    State(directory): State<IdentityState>,
    mut request: Request,
    next: Next,
) -> Response {
    let raw = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    let Some(raw) = raw else {
        return next.run(request).await;
    };

    let user_id = match UserId::new(raw) {
        Ok(id) => id,
        Err(_) => return IdentityRejection::Unknown.into_response(),
    };

    match directory.current_user(&user_id).await {
        Ok(account) => {
            request.extensions_mut().insert(account);
            next.run(request).await
        }
        Err(DirectoryError::NotFound(_)) => IdentityRejection::Unknown.into_response(),
        Err(DirectoryError::Unavailable(msg)) => {
            tracing::error!("Account directory unavailable: {}", msg);
            IdentityRejection::DirectoryUnavailable.into_response()
        }
    }
}

/// Extractor that requires a resolved caller account.
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserAccount);

#[async_trait]
impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = IdentityRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserAccount>()
            .cloned()
            .map(RequireUser)
            .ok_or(IdentityRejection::Missing)
    }
}

/// Rejection type for identity failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityRejection {
    /// No caller identity on the request.
    Missing,
    /// The identity does not match any account.
    Unknown,
    /// The account directory could not be reached.
    DirectoryUnavailable,
}

impl IntoResponse for IdentityRejection {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            IdentityRejection::Missing => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required",
            ),
            IdentityRejection::Unknown => {
                (StatusCode::UNAUTHORIZED, "UNKNOWN_USER", "Unknown user")
            }
            IdentityRejection::DirectoryUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "DIRECTORY_UNAVAILABLE",
                "Account service unavailable",
            ),
        };
        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}
