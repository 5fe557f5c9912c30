//! RunRedesignHandler - Orchestrates one redesign run.
//!
//! Sequence: validate input → claim the per-user run slot → check credits →
//! credential pre-check → analyze → synthesize → save project → debit one
//! credit → best-effort balance and history refresh.
//!
//! No step is retried. Every AI failure is classified before it reaches the
//! caller. The debit happens only after the project is saved, so a failure
//! between the two can leave a saved project without a charge but never a
//! charge without a project.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::domain::account::{Credits, LedgerError};
use crate::domain::foundation::{StateMachine, Timestamp, UserId};
use crate::domain::redesign::{
    ClassifiedError, DesignStyle, ErrorClassifier, PipelinePhase, RedesignError, RedesignProject,
    RoomImage, ServiceFailure,
};
use crate::ports::{CredentialGate, CreditLedger, ProjectStore, RoomAnalyzer, RoomSynthesizer};

/// Command to redesign one room photo in one style.
#[derive(Debug)]
pub struct RunRedesignCommand {
    pub user_id: UserId,
    pub image: RoomImage,
    /// Raw style identifier; validated against the catalog before any call.
    pub style: String,
    /// Receives every phase change of the run.
    pub progress: Option<watch::Sender<PipelinePhase>>,
}

impl RunRedesignCommand {
    pub fn new(user_id: UserId, image: RoomImage, style: impl Into<String>) -> Self {
        Self {
            user_id,
            image,
            style: style.into(),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: watch::Sender<PipelinePhase>) -> Self {
        self.progress = Some(progress);
        self
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunRedesignResult {
    pub project: RedesignProject,
    /// False only when the project was saved but the debit did not go through.
    pub credit_charged: bool,
    /// Latest known balance, `None` if neither the debit nor the refresh
    /// produced one.
    pub remaining_credits: Option<Credits>,
    /// Refreshed history, `None` if the refresh failed.
    pub history: Option<Vec<RedesignProject>>,
}

/// Configuration for the redesign handler.
#[derive(Debug, Clone)]
pub struct RedesignPipelineConfig {
    /// Largest accepted upload in bytes.
    pub max_image_bytes: u64,
}

impl Default for RedesignPipelineConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Transient state of one run. Lives only inside `handle`.
struct PipelineRun {
    style: DesignStyle,
    phase: PipelinePhase,
    progress: Option<watch::Sender<PipelinePhase>>,
}

impl PipelineRun {
    fn new(style: DesignStyle, progress: Option<watch::Sender<PipelinePhase>>) -> Self {
        Self {
            style,
            phase: PipelinePhase::Idle,
            progress,
        }
    }

    fn advance(&mut self, next: PipelinePhase) -> Result<(), RedesignError> {
        self.phase = self
            .phase
            .transition_to(next)
            .map_err(|e| RedesignError::Internal(e.to_string()))?;
        debug!(phase = %self.phase, style = %self.style, "pipeline phase changed");
        if let Some(progress) = &self.progress {
            // Nobody listening is fine.
            let _ = progress.send(self.phase);
        }
        Ok(())
    }

    fn fail(&mut self, error: ClassifiedError) -> RedesignError {
        if let Err(e) = self.advance(PipelinePhase::Failed) {
            return e;
        }
        RedesignError::Classified(error)
    }
}

/// Releases the per-user run slot on every exit path.
struct RunSlot {
    registry: Arc<Mutex<HashSet<UserId>>>,
    user_id: UserId,
}

impl Drop for RunSlot {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.user_id);
    }
}

/// The pipeline orchestrator.
pub struct RunRedesignHandler {
    analyzer: Arc<dyn RoomAnalyzer>,
    synthesizer: Arc<dyn RoomSynthesizer>,
    credential_gate: Arc<dyn CredentialGate>,
    ledger: Arc<dyn CreditLedger>,
    store: Arc<dyn ProjectStore>,
    classifier: ErrorClassifier,
    config: RedesignPipelineConfig,
    in_flight: Arc<Mutex<HashSet<UserId>>>,
}

impl RunRedesignHandler {
    pub fn new(
        analyzer: Arc<dyn RoomAnalyzer>,
        synthesizer: Arc<dyn RoomSynthesizer>,
        credential_gate: Arc<dyn CredentialGate>,
        ledger: Arc<dyn CreditLedger>,
        store: Arc<dyn ProjectStore>,
    ) -> Self {
        Self::with_config(
            analyzer,
            synthesizer,
            credential_gate,
            ledger,
            store,
            RedesignPipelineConfig::default(),
        )
    }

    pub fn with_config(
        analyzer: Arc<dyn RoomAnalyzer>,
        synthesizer: Arc<dyn RoomSynthesizer>,
        credential_gate: Arc<dyn CredentialGate>,
        ledger: Arc<dyn CreditLedger>,
        store: Arc<dyn ProjectStore>,
        config: RedesignPipelineConfig,
    ) -> Self {
        Self {
            analyzer,
            synthesizer,
            credential_gate,
            ledger,
            store,
            classifier: ErrorClassifier::new(),
            config,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// True while a run for `user_id` is between claim and completion.
    pub fn is_running(&self, user_id: &UserId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user_id)
    }

    /// Runs the pipeline once.
    pub async fn handle(
        &self,
        cmd: RunRedesignCommand,
    ) -> Result<RunRedesignResult, RedesignError> {
        let RunRedesignCommand {
            user_id,
            image,
            style,
            progress,
        } = cmd;

        // 1. Caller contract checks, before anything external
        let style: DesignStyle = style.parse()?;
        image.ensure_within(self.config.max_image_bytes)?;

        // 2. One run per user at a time
        let _slot = self
            .claim_slot(&user_id)
            .ok_or_else(|| RedesignError::RunInProgress(user_id.clone()))?;

        let span = info_span!("redesign_run", user_id = %user_id, style = %style);
        self.execute(user_id, image, style, progress)
            .instrument(span)
            .await
    }

    async fn execute(
        &self,
        user_id: UserId,
        image: RoomImage,
        style: DesignStyle,
        progress: Option<watch::Sender<PipelinePhase>>,
    ) -> Result<RunRedesignResult, RedesignError> {
        info!(image_bytes = image.len(), "redesign run started");

        // 3. Credits gate entry
        let balance = self
            .ledger
            .fetch_balance(&user_id)
            .await
            .map_err(ledger_entry_error)?;
        if !balance.can_spend() {
            info!("redesign refused: no credits");
            return Err(ClassifiedError::InsufficientCredits.into());
        }

        // 4. Credential pre-check. The selection flow is started but not
        //    awaited; a still-missing credential surfaces through the
        //    classifier on the first AI call.
        if !self.credential_gate.has_credential().await {
            info!("no AI credential selected, opening selection");
            let gate = Arc::clone(&self.credential_gate);
            tokio::spawn(async move { gate.request_credential().await });
        }

        let mut run = PipelineRun::new(style, progress);

        // 5. Analyze
        run.advance(PipelinePhase::Analyzing)?;
        let analysis = match self.analyzer.analyze(&image, style).await {
            Ok(analysis) => analysis,
            Err(failure) => return Err(self.fail_external(&mut run, failure).await),
        };
        debug!(room_type = analysis.room_type(), "room analyzed");

        // 6. Synthesize, conditioned on the analysis
        run.advance(PipelinePhase::Synthesizing)?;
        let redesigned = match self.synthesizer.synthesize(&image, style, &analysis).await {
            Ok(redesigned) => redesigned,
            Err(failure) => return Err(self.fail_external(&mut run, failure).await),
        };

        // 7. Save. Nothing has been charged yet.
        run.advance(PipelinePhase::Saving)?;
        let project = RedesignProject::from_run(
            user_id.clone(),
            image,
            redesigned,
            style,
            &analysis,
            Timestamp::now(),
        );
        if let Err(e) = self.store.save(&project).await {
            error!(error = %e, "failed to persist project");
            return Err(run.fail(ClassifiedError::PersistenceFailure(e.to_string())));
        }

        // 8. Exactly one debit, only after the save
        let debited = match self.ledger.debit(&user_id).await {
            Ok(balance) => Some(balance),
            Err(e) => {
                warn!(
                    project_id = %project.id(),
                    error = %e,
                    "project saved without a matching credit debit"
                );
                None
            }
        };
        run.advance(PipelinePhase::Succeeded)?;

        // 9. Best-effort refresh
        let (balance, history) = futures::join!(
            self.ledger.fetch_balance(&user_id),
            self.store.list_for_user(&user_id)
        );
        let balance = balance
            .map_err(|e| warn!(error = %e, "balance refresh failed"))
            .ok();
        let history = history
            .map_err(|e| warn!(error = %e, "history refresh failed"))
            .ok();

        info!(project_id = %project.id(), room_type = project.room_type(), "redesign run succeeded");

        Ok(RunRedesignResult {
            credit_charged: debited.is_some(),
            remaining_credits: balance.or(debited),
            history,
            project,
        })
    }

    /// Classifies an AI failure, fails the run, and reopens credential
    /// selection for credential failures before returning.
    async fn fail_external(&self, run: &mut PipelineRun, failure: ServiceFailure) -> RedesignError {
        let classified = self.classifier.classify(&failure);
        warn!(
            phase = %run.phase,
            code = %classified.code(),
            status = ?failure.status,
            message = %failure.message,
            "AI call failed"
        );
        if classified.requires_credential_reselection() {
            self.credential_gate.mark_absent();
            self.credential_gate.request_credential().await;
        }
        run.fail(classified)
    }

    fn claim_slot(&self, user_id: &UserId) -> Option<RunSlot> {
        let mut running = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if !running.insert(user_id.clone()) {
            return None;
        }
        Some(RunSlot {
            registry: Arc::clone(&self.in_flight),
            user_id: user_id.clone(),
        })
    }
}

fn ledger_entry_error(error: LedgerError) -> RedesignError {
    match error {
        LedgerError::InsufficientCredits => ClassifiedError::InsufficientCredits.into(),
        other => ClassifiedError::UnknownFailure(other.to_string()).into(),
    }
}
