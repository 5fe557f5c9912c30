//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' exceeds maximum of {max}, got {actual}")]
    TooLarge { field: String, max: u64, actual: u64 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a size limit validation error.
    pub fn too_large(field: impl Into<String>, max: u64, actual: u64) -> Self {
        ValidationError::TooLarge {
            field: field.into(),
            max,
            actual,
        }
    }
}

/// Stable machine-readable codes surfaced to API clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    UnknownStyle,
    UnsupportedImage,

    // Not found errors
    UserNotFound,

    // State errors
    RunInProgress,
    InsufficientCredits,

    // AI errors
    InvalidRoomImage,
    CredentialRejected,
    CredentialInvalid,
    UnknownFailure,

    // Infrastructure errors
    PersistenceFailure,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::UnknownStyle => "UNKNOWN_STYLE",
            ErrorCode::UnsupportedImage => "UNSUPPORTED_IMAGE",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::RunInProgress => "RUN_IN_PROGRESS",
            ErrorCode::InsufficientCredits => "INSUFFICIENT_CREDITS",
            ErrorCode::InvalidRoomImage => "INVALID_ROOM_IMAGE",
            ErrorCode::CredentialRejected => "CREDENTIAL_REJECTED",
            ErrorCode::CredentialInvalid => "CREDENTIAL_INVALID",
            ErrorCode::UnknownFailure => "UNKNOWN_FAILURE",
            ErrorCode::PersistenceFailure => "PERSISTENCE_FAILURE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
