//! Errors for credit, account, and project persistence collaborators.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, UserId};

/// Credit ledger failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("insufficient credits")]
    InsufficientCredits,

    #[error("user not found: {0}")]
    UserNotFound(UserId),

    #[error("credit ledger unavailable: {0}")]
    Unavailable(String),
}

impl LedgerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        LedgerError::Unavailable(message.into())
    }
}

/// Project store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("project store unavailable: {0}")]
    Unavailable(String),

    #[error("project store rejected the record: {0}")]
    Rejected(String),
}

impl StoreError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable(message.into())
    }
}

/// Account directory failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectoryError {
    #[error("user not found: {0}")]
    NotFound(UserId),

    #[error("account directory unavailable: {0}")]
    Unavailable(String),
}

impl DirectoryError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DirectoryError::NotFound(_) => ErrorCode::UserNotFound,
            DirectoryError::Unavailable(_) => ErrorCode::InternalError,
        }
    }
}
