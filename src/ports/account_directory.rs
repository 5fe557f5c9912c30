//! AccountDirectory port - Lookup and creation of user accounts.
//!
//! Stands in for the `current-user` and `create-session` endpoints of the
//! backing store. Authentication itself happens upstream.

use async_trait::async_trait;

use crate::domain::account::{DirectoryError, Identity, UserAccount};
use crate::domain::foundation::UserId;

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// The account for an already-identified user.
    async fn current_user(&self, user_id: &UserId) -> Result<UserAccount, DirectoryError>;

    /// Returns the existing account for this identity's email, or opens a
    /// new one with the configured starting balance.
    async fn create_session(&self, identity: Identity) -> Result<UserAccount, DirectoryError>;
}
