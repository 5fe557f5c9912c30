//! In-memory studio store.
//!
//! Thread-safe via an internal `Mutex`. Does not persist data across
//! restarts. Debits are checked and applied under the same lock, so
//! concurrent debits can never take a balance below zero.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::account::{
    Credits, DirectoryError, Identity, LedgerError, StoreError, UserAccount,
};
use crate::domain::foundation::UserId;
use crate::domain::redesign::{sort_newest_first, RedesignProject};
use crate::ports::{AccountDirectory, CreditLedger, ProjectStore};

#[derive(Debug, Default)]
struct StudioState {
    accounts: HashMap<UserId, UserAccount>,
    projects: Vec<RedesignProject>,
}

/// In-memory implementation of the persistence ports.
#[derive(Debug)]
pub struct InMemoryStudioStore {
    initial_credits: Credits,
    state: Mutex<StudioState>,
}

impl InMemoryStudioStore {
    /// Creates an empty store. New sessions start with `initial_credits`.
    pub fn new(initial_credits: Credits) -> Self {
        Self {
            initial_credits,
            state: Mutex::new(StudioState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, StudioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CreditLedger for InMemoryStudioStore {
    async fn fetch_balance(&self, user_id: &UserId) -> Result<Credits, LedgerError> {
        self.state()
            .accounts
            .get(user_id)
            .map(|account| account.credits)
            .ok_or_else(|| LedgerError::UserNotFound(user_id.clone()))
    }

    async fn debit(&self, user_id: &UserId) -> Result<Credits, LedgerError> {
        let mut state = self.state();
        let account = state
            .accounts
            .get_mut(user_id)
            .ok_or_else(|| LedgerError::UserNotFound(user_id.clone()))?;
        let remaining = account
            .credits
            .debited()
            .ok_or(LedgerError::InsufficientCredits)?;
        account.credits = remaining;
        Ok(remaining)
    }
}

#[async_trait]
impl ProjectStore for InMemoryStudioStore {
    async fn save(&self, project: &RedesignProject) -> Result<(), StoreError> {
        let mut state = self.state();
        if state.projects.iter().any(|p| p.id() == project.id()) {
            return Err(StoreError::Rejected(format!(
                "project {} already exists",
                project.id()
            )));
        }
        state.projects.push(project.clone());
        Ok(())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<RedesignProject>, StoreError> {
        let mut projects: Vec<RedesignProject> = self
            .state()
            .projects
            .iter()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut projects);
        Ok(projects)
    }
}

#[async_trait]
impl AccountDirectory for InMemoryStudioStore {
    async fn current_user(&self, user_id: &UserId) -> Result<UserAccount, DirectoryError> {
        self.state()
            .accounts
            .get(user_id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(user_id.clone()))
    }

    async fn create_session(&self, identity: Identity) -> Result<UserAccount, DirectoryError> {
        let mut state = self.state();
        if let Some(existing) = state.accounts.values().find(|a| a.email == identity.email) {
            return Ok(existing.clone());
        }
        let account = UserAccount::open(identity, self.initial_credits);
        state.accounts.insert(account.id.clone(), account.clone());
        Ok(account)
    }
}
