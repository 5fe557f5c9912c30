//! API error type and its HTTP status mapping.
//!
//! | Source | Status |
//! |--------|--------|
//! | InsufficientCredits | 402 |
//! | InvalidRoomImage | 422 |
//! | CredentialRejected | 403 |
//! | CredentialInvalid | 401 |
//! | PersistenceFailure, UnknownFailure | 502 |
//! | RunInProgress | 409 |
//! | UnknownStyle, InvalidImage, request validation | 400 |
//! | user not found | 404 |
//! | store or directory unavailable | 502 |
//! | Internal | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::account::{DirectoryError, LedgerError, StoreError};
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::redesign::{ClassifiedError, DesignStyle, RedesignError};

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error wrapper for proper HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Redesign(RedesignError),
    Ledger(LedgerError),
    Store(StoreError),
    Directory(DirectoryError),
    Validation(ValidationError),
    Internal(String),
}

impl From<RedesignError> for ApiError {
    fn from(err: RedesignError) -> Self {
        ApiError::Redesign(err)
    }
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError::Ledger(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}

impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        ApiError::Directory(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

fn classified_status(err: &ClassifiedError) -> StatusCode {
    match err {
        ClassifiedError::InsufficientCredits => StatusCode::PAYMENT_REQUIRED,
        ClassifiedError::InvalidRoomImage(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ClassifiedError::CredentialRejected(_) => StatusCode::FORBIDDEN,
        ClassifiedError::CredentialInvalid(_) => StatusCode::UNAUTHORIZED,
        ClassifiedError::PersistenceFailure(_) | ClassifiedError::UnknownFailure(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

impl ApiError {
    /// Status code, machine code, and client-facing message.
    pub fn parts(&self) -> (StatusCode, ErrorCode, String) {
        match self {
            ApiError::Redesign(RedesignError::Classified(err)) => {
                (classified_status(err), err.code(), err.user_message())
            }
            ApiError::Redesign(err @ RedesignError::RunInProgress(_)) => {
                (StatusCode::CONFLICT, err.code(), err.to_string())
            }
            ApiError::Redesign(err @ RedesignError::Internal(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                err.code(),
                "Internal server error".to_string(),
            ),
            ApiError::Redesign(err) => (StatusCode::BAD_REQUEST, err.code(), err.to_string()),
            ApiError::Ledger(LedgerError::InsufficientCredits) => (
                StatusCode::PAYMENT_REQUIRED,
                ErrorCode::InsufficientCredits,
                ClassifiedError::InsufficientCredits.user_message(),
            ),
            ApiError::Ledger(err @ LedgerError::UserNotFound(_)) => {
                (StatusCode::NOT_FOUND, ErrorCode::UserNotFound, err.to_string())
            }
            ApiError::Ledger(err @ LedgerError::Unavailable(_)) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::PersistenceFailure, err.to_string())
            }
            ApiError::Store(err) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::PersistenceFailure, err.to_string())
            }
            ApiError::Directory(err @ DirectoryError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, err.code(), err.to_string())
            }
            ApiError::Directory(err @ DirectoryError::Unavailable(_)) => {
                (StatusCode::BAD_GATEWAY, ErrorCode::PersistenceFailure, err.to_string())
            }
            ApiError::Validation(err) => {
                (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed, err.to_string())
            }
            ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl ApiError {
    /// Extra context a client can act on. An unknown style lists the valid ids.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Redesign(RedesignError::UnknownStyle(_)) => {
                let styles: Vec<&str> = DesignStyle::CATALOG.iter().map(|s| s.as_str()).collect();
                Some(serde_json::json!({ "styles": styles }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), code = %code, error = ?self, "request failed");
        }
        let mut body = ErrorResponse::new(code.to_string(), message);
        if let Some(details) = self.details() {
            body = body.with_details(details);
        }
        (status, Json(body)).into_response()
    }
}
