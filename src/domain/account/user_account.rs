//! User account as seen by the redesign core.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{UserId, ValidationError};

use super::Credits;

/// Identity presented when opening a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let email = email.into().trim().to_lowercase();
        let name = name.into().trim().to_string();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "missing @ symbol"));
        }
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self { email, name })
    }
}

/// A user and their remaining credit balance.
///
/// `credits` is the only field the pipeline mutates, and only through the
/// credit ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub credits: Credits,
}

impl UserAccount {
    /// Opens a fresh account for an identity with a starting balance.
    pub fn open(identity: Identity, initial_credits: Credits) -> Self {
        Self {
            id: UserId::generate(),
            email: identity.email,
            name: identity.name,
            credits: initial_credits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_normalizes_email() {
        let identity = Identity::new("  Ada@Example.COM ", " Ada ").unwrap();
        assert_eq!(identity.email, "ada@example.com");
        assert_eq!(identity.name, "Ada");
    }

    #[test]
    fn identity_requires_email_and_name() {
        assert!(Identity::new("", "Ada").is_err());
        assert!(Identity::new("ada.example.com", "Ada").is_err());
        assert!(Identity::new("ada@example.com", " ").is_err());
    }

    #[test]
    fn open_assigns_id_and_balance() {
        let identity = Identity::new("ada@example.com", "Ada").unwrap();
        let account = UserAccount::open(identity, Credits::new(3));
        assert_eq!(account.credits, Credits::new(3));
        assert!(!account.id.as_str().is_empty());
    }
}
