//! GetBalanceHandler - Query handler for the authoritative credit balance.

use std::sync::Arc;

use crate::domain::account::{Credits, LedgerError};
use crate::domain::foundation::UserId;
use crate::ports::CreditLedger;

#[derive(Debug, Clone)]
pub struct GetBalanceQuery {
    pub user_id: UserId,
}

pub struct GetBalanceHandler {
    ledger: Arc<dyn CreditLedger>,
}

impl GetBalanceHandler {
    pub fn new(ledger: Arc<dyn CreditLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(&self, query: GetBalanceQuery) -> Result<Credits, LedgerError> {
        self.ledger.fetch_balance(&query.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStudioStore;
    use crate::domain::account::Identity;
    use crate::ports::AccountDirectory;

    #[tokio::test]
    async fn reflects_debits() {
        let store = Arc::new(InMemoryStudioStore::new(Credits::new(2)));
        let user = store
            .create_session(Identity::new("ada@example.com", "Ada").unwrap())
            .await
            .unwrap();
        store.debit(&user.id).await.unwrap();

        let handler = GetBalanceHandler::new(store);
        let balance = handler
            .handle(GetBalanceQuery { user_id: user.id })
            .await
            .unwrap();

        assert_eq!(balance, Credits::new(1));
    }

    #[tokio::test]
    async fn unknown_user_is_reported() {
        let handler = GetBalanceHandler::new(Arc::new(InMemoryStudioStore::new(Credits::new(2))));
        let ghost = UserId::new("ghost").unwrap();

        let err = handler
            .handle(GetBalanceQuery {
                user_id: ghost.clone(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, LedgerError::UserNotFound(ghost));
    }
}
