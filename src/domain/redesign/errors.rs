//! Error types for the redesign pipeline.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InsufficientCredits | 402 |
//! | InvalidRoomImage | 422 |
//! | CredentialRejected | 403 |
//! | CredentialInvalid | 401 |
//! | PersistenceFailure | 502 |
//! | UnknownFailure | 502 |
//! | RunInProgress | 409 |
//! | UnknownStyle / InvalidImage | 400 |
//! | Internal | 500 |

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, UserId, ValidationError};

/// Raw failure reported by an external AI collaborator.
///
/// Carries whatever the service gave us: an HTTP-like status, a structured
/// status code (for example `PERMISSION_DENIED`), and the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceFailure {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: String,
}

impl ServiceFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            code: None,
            message: message.into(),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Closed taxonomy of failures surfaced to the caller of a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifiedError {
    #[error("no credits remaining")]
    InsufficientCredits,

    #[error("image is not a recognizable room: {0}")]
    InvalidRoomImage(String),

    #[error("AI credential was rejected: {0}")]
    CredentialRejected(String),

    #[error("AI credential is missing or invalid: {0}")]
    CredentialInvalid(String),

    #[error("failed to save project: {0}")]
    PersistenceFailure(String),

    #[error("redesign failed: {0}")]
    UnknownFailure(String),
}

impl ClassifiedError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ClassifiedError::InsufficientCredits => ErrorCode::InsufficientCredits,
            ClassifiedError::InvalidRoomImage(_) => ErrorCode::InvalidRoomImage,
            ClassifiedError::CredentialRejected(_) => ErrorCode::CredentialRejected,
            ClassifiedError::CredentialInvalid(_) => ErrorCode::CredentialInvalid,
            ClassifiedError::PersistenceFailure(_) => ErrorCode::PersistenceFailure,
            ClassifiedError::UnknownFailure(_) => ErrorCode::UnknownFailure,
        }
    }

    /// Credential failures force the gate back to "absent" and reopen the
    /// interactive selection before the error is surfaced.
    pub fn requires_credential_reselection(&self) -> bool {
        matches!(
            self,
            ClassifiedError::CredentialRejected(_) | ClassifiedError::CredentialInvalid(_)
        )
    }

    /// Text suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ClassifiedError::InsufficientCredits => {
                "You have no credits left. Top up to create more redesigns.".to_string()
            }
            ClassifiedError::InvalidRoomImage(message) => message.clone(),
            ClassifiedError::CredentialRejected(_) => {
                "The selected AI key does not have permission. Please select a different key."
                    .to_string()
            }
            ClassifiedError::CredentialInvalid(_) => {
                "The selected AI key is invalid. Please select a valid key.".to_string()
            }
            ClassifiedError::PersistenceFailure(_) => {
                "Your redesign could not be saved. No credit was charged.".to_string()
            }
            ClassifiedError::UnknownFailure(message) => message.clone(),
        }
    }
}

/// Everything `RunRedesignHandler::handle` can return.
///
/// `Classified` is the outcome of a started run; the other variants are
/// caller contract violations detected before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedesignError {
    #[error(transparent)]
    Classified(#[from] ClassifiedError),

    #[error("unknown style '{0}'")]
    UnknownStyle(String),

    #[error("invalid image: {0}")]
    InvalidImage(ValidationError),

    #[error("a redesign is already running for user {0}")]
    RunInProgress(UserId),

    #[error("internal pipeline error: {0}")]
    Internal(String),
}

impl RedesignError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RedesignError::Classified(err) => err.code(),
            RedesignError::UnknownStyle(_) => ErrorCode::UnknownStyle,
            RedesignError::InvalidImage(_) => ErrorCode::UnsupportedImage,
            RedesignError::RunInProgress(_) => ErrorCode::RunInProgress,
            RedesignError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// The classified error, if the run got far enough to produce one.
    pub fn classified(&self) -> Option<&ClassifiedError> {
        match self {
            RedesignError::Classified(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RedesignError {
    fn from(err: ValidationError) -> Self {
        RedesignError::InvalidImage(err)
    }
}
