//! GetCurrentUserHandler - Query handler for the signed-in account.

use std::sync::Arc;

use crate::domain::account::{DirectoryError, UserAccount};
use crate::domain::foundation::UserId;
use crate::ports::AccountDirectory;

#[derive(Debug, Clone)]
pub struct GetCurrentUserQuery {
    pub user_id: UserId,
}

pub struct GetCurrentUserHandler {
    directory: Arc<dyn AccountDirectory>,
}

impl GetCurrentUserHandler {
    pub fn new(directory: Arc<dyn AccountDirectory>) -> Self {
        Self { directory }
    }

    pub async fn handle(&self, query: GetCurrentUserQuery) -> Result<UserAccount, DirectoryError> {
        self.directory.current_user(&query.user_id).await
    }
}
