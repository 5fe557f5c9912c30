//! StudioSession - The one controller owning a signed-in user's view state.
//!
//! Holds the current account, the last known balance and history, the
//! credential flag, and the status of the most recent run. State changes only
//! through the methods below; callers read it through [`StudioSession::snapshot`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::warn;

use crate::domain::account::{Credits, DirectoryError, UserAccount};
use crate::domain::foundation::UserId;
use crate::domain::redesign::{
    ClassifiedError, PipelinePhase, RedesignError, RedesignProject, RoomImage,
};
use crate::ports::{AccountDirectory, CredentialGate, CreditLedger, ProjectStore};

use super::{RunRedesignCommand, RunRedesignHandler};

/// Caller-visible application state.
#[derive(Debug, Clone, Default)]
pub struct StudioState {
    pub account: Option<UserAccount>,
    pub balance: Option<Credits>,
    pub history: Vec<RedesignProject>,
    pub credential_selected: bool,
    pub last_phase: PipelinePhase,
    pub last_error: Option<ClassifiedError>,
}

pub struct StudioSession {
    user_id: UserId,
    runner: Arc<RunRedesignHandler>,
    directory: Arc<dyn AccountDirectory>,
    ledger: Arc<dyn CreditLedger>,
    store: Arc<dyn ProjectStore>,
    credential_gate: Arc<dyn CredentialGate>,
    state: Mutex<StudioState>,
}

impl StudioSession {
    pub fn new(
        user_id: UserId,
        runner: Arc<RunRedesignHandler>,
        directory: Arc<dyn AccountDirectory>,
        ledger: Arc<dyn CreditLedger>,
        store: Arc<dyn ProjectStore>,
        credential_gate: Arc<dyn CredentialGate>,
    ) -> Self {
        Self {
            user_id,
            runner,
            directory,
            ledger,
            store,
            credential_gate,
            state: Mutex::new(StudioState::default()),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> StudioState {
        self.state().clone()
    }

    /// Loads the account, then balance, history, and credential flag.
    pub async fn load(&self) -> Result<(), DirectoryError> {
        let account = self.directory.current_user(&self.user_id).await?;
        {
            let mut state = self.state();
            state.balance = Some(account.credits);
            state.account = Some(account);
        }
        self.resync().await;
        Ok(())
    }

    /// Opens the credential selection flow and records the outcome.
    pub async fn select_credential(&self) -> bool {
        self.credential_gate.request_credential().await;
        let selected = self.credential_gate.has_credential().await;
        self.state().credential_selected = selected;
        selected
    }

    /// Runs one redesign and reconciles balance and history afterwards,
    /// whatever the outcome.
    pub async fn redesign(
        &self,
        image: RoomImage,
        style: &str,
    ) -> Result<RedesignProject, RedesignError> {
        let (progress, mut phases) = watch::channel(PipelinePhase::Idle);
        self.state().last_error = None;

        let command =
            RunRedesignCommand::new(self.user_id.clone(), image, style).with_progress(progress);
        let outcome = self.runner.handle(command).await;

        // The sender is gone once the run returns; the last value is the
        // terminal phase, or Idle if the run was refused up front.
        let last_phase = *phases.borrow_and_update();
        {
            let mut state = self.state();
            state.last_phase = last_phase;
            if let Err(err) = &outcome {
                state.last_error = err.classified().cloned();
            }
        }

        self.resync().await;
        outcome.map(|result| result.project)
    }

    /// Best-effort refresh of balance, history, and the credential flag.
    async fn resync(&self) {
        let (balance, history, selected) = futures::join!(
            self.ledger.fetch_balance(&self.user_id),
            self.store.list_for_user(&self.user_id),
            self.credential_gate.has_credential()
        );

        let mut state = self.state();
        match balance {
            Ok(balance) => {
                state.balance = Some(balance);
                if let Some(account) = state.account.as_mut() {
                    account.credits = balance;
                }
            }
            Err(e) => warn!(user_id = %self.user_id, error = %e, "balance re-sync failed"),
        }
        match history {
            Ok(history) => state.history = history,
            Err(e) => warn!(user_id = %self.user_id, error = %e, "history re-sync failed"),
        }
        state.credential_selected = selected;
    }

    fn state(&self) -> MutexGuard<'_, StudioState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockRoomAnalyzer, MockRoomSynthesizer};
    use crate::adapters::credential::MockCredentialGate;
    use crate::adapters::memory::InMemoryStudioStore;
    use crate::domain::account::Identity;
    use crate::domain::redesign::{ImageFormat, ServiceFailure};

    struct Fixture {
        analyzer: Arc<MockRoomAnalyzer>,
        gate: Arc<MockCredentialGate>,
        session: StudioSession,
    }

    async fn fixture(credits: u32) -> Fixture {
        let store = Arc::new(InMemoryStudioStore::new(Credits::new(credits)));
        let account = store
            .create_session(Identity::new("ada@example.com", "Ada").unwrap())
            .await
            .unwrap();
        let analyzer = Arc::new(MockRoomAnalyzer::new());
        let gate = Arc::new(MockCredentialGate::selected());
        let runner = Arc::new(RunRedesignHandler::new(
            analyzer.clone(),
            Arc::new(MockRoomSynthesizer::new()),
            gate.clone(),
            store.clone(),
            store.clone(),
        ));
        let session = StudioSession::new(
            account.id,
            runner,
            store.clone(),
            store.clone(),
            store,
            gate.clone(),
        );
        session.load().await.unwrap();
        Fixture {
            analyzer,
            gate,
            session,
        }
    }

    fn photo() -> RoomImage {
        RoomImage::new(ImageFormat::Webp, vec![1, 2, 3, 4]).unwrap()
    }

    #[tokio::test]
    async fn load_populates_account_and_balance() {
        let fx = fixture(3).await;
        let state = fx.session.snapshot();

        assert_eq!(state.account.unwrap().email, "ada@example.com");
        assert_eq!(state.balance, Some(Credits::new(3)));
        assert!(state.history.is_empty());
        assert!(state.credential_selected);
        assert_eq!(state.last_phase, PipelinePhase::Idle);
    }

    #[tokio::test]
    async fn successful_redesign_updates_balance_and_history() {
        let fx = fixture(3).await;

        let project = fx.session.redesign(photo(), "scandinavian").await.unwrap();

        let state = fx.session.snapshot();
        assert_eq!(state.balance, Some(Credits::new(2)));
        assert_eq!(state.account.unwrap().credits, Credits::new(2));
        assert_eq!(state.history, vec![project]);
        assert_eq!(state.last_phase, PipelinePhase::Succeeded);
        assert!(state.last_error.is_none());
    }

    #[tokio::test]
    async fn failed_redesign_records_error_and_resyncs_credential_flag() {
        let fx = fixture(3).await;
        fx.analyzer
            .push_failure(ServiceFailure::new("PERMISSION_DENIED").with_status(403));

        let err = fx.session.redesign(photo(), "modern").await.unwrap_err();

        let state = fx.session.snapshot();
        assert_eq!(state.last_phase, PipelinePhase::Failed);
        assert_eq!(state.last_error.as_ref(), err.classified());
        assert!(!state.credential_selected);
        assert_eq!(state.balance, Some(Credits::new(3)));
    }

    #[tokio::test]
    async fn refused_run_stays_idle() {
        let fx = fixture(0).await;

        let err = fx.session.redesign(photo(), "modern").await.unwrap_err();

        assert_eq!(err.classified(), Some(&ClassifiedError::InsufficientCredits));
        let state = fx.session.snapshot();
        assert_eq!(state.last_phase, PipelinePhase::Idle);
        assert_eq!(state.last_error, Some(ClassifiedError::InsufficientCredits));
    }

    #[tokio::test]
    async fn select_credential_refreshes_flag() {
        let fx = fixture(1).await;
        fx.gate.set_selected(false);

        assert!(!fx.session.select_credential().await);
        assert_eq!(fx.gate.request_count(), 1);

        fx.gate.set_selected(true);
        assert!(fx.session.select_credential().await);
        assert!(fx.session.snapshot().credential_selected);
    }
}
