//! CreditLedger port - Authoritative per-user credit balance.

use async_trait::async_trait;

use crate::domain::account::{Credits, LedgerError};
use crate::domain::foundation::UserId;

/// Port for the credit balance store.
///
/// `debit` is the single writer path for balances. It must fail closed with
/// `LedgerError::InsufficientCredits` at zero and never go negative.
#[async_trait]
pub trait CreditLedger: Send + Sync {
    /// Re-fetch the authoritative balance.
    async fn fetch_balance(&self, user_id: &UserId) -> Result<Credits, LedgerError>;

    /// Spend one credit and return the new balance.
    async fn debit(&self, user_id: &UserId) -> Result<Credits, LedgerError>;
}
