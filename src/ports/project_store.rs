//! ProjectStore port - Append-only history of completed redesigns.

use async_trait::async_trait;

use crate::domain::account::StoreError;
use crate::domain::foundation::UserId;
use crate::domain::redesign::RedesignProject;

/// Port for project persistence. No update or delete is offered.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Append one project record.
    async fn save(&self, project: &RedesignProject) -> Result<(), StoreError>;

    /// All projects of a user, newest first. Repeated calls without an
    /// intervening `save` return the same sequence.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RedesignProject>, StoreError>;
}
