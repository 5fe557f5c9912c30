//! CreateSessionHandler - Opens (or resumes) a user's account.
//!
//! Returns the existing account when the email is already known, so signing
//! in twice never grants a second starting balance.

use std::sync::Arc;
use tracing::info;

use crate::domain::account::{DirectoryError, Identity, UserAccount};
use crate::ports::AccountDirectory;

#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub identity: Identity,
}

pub struct CreateSessionHandler {
    directory: Arc<dyn AccountDirectory>,
}

impl CreateSessionHandler {
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, cmd: CreateSessionCommand) -> Result<UserAccount, DirectoryError> {
        let account = self.directory.create_session(cmd.identity).await?;
        info!(user_id = %account.id, credits = account.credits.value(), "session opened");
        Ok(account)
    }
}
