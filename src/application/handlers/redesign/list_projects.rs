//! ListProjectsHandler - Query handler for a user's redesign history.

use std::sync::Arc;

use crate::domain::account::StoreError;
use crate::domain::foundation::UserId;
use crate::domain::redesign::RedesignProject;
use crate::ports::ProjectStore;

/// Query for all projects of one user.
#[derive(Debug, Clone)]
pub struct ListProjectsQuery {
    pub user_id: UserId,
}

/// Returns the user's projects, newest first.
pub struct ListProjectsHandler {
    store: Arc<dyn ProjectStore>,
}

impl ListProjectsHandler {
    pub fn new(store: Arc<dyn ProjectStore>) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        query: ListProjectsQuery,
    ) -> Result<Vec<RedesignProject>, StoreError> {
        self.store.list_for_user(&query.user_id).await
    }
}
