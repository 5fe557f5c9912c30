//! Pipeline run lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Phase of a single redesign run.
///
/// ```text
/// Idle → Analyzing → Synthesizing → Saving → Succeeded
///            │            │            │
///            └────────────┴────────────┴──→ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelinePhase {
    #[default]
    Idle,
    Analyzing,
    Synthesizing,
    Saving,
    Succeeded,
    Failed,
}

impl StateMachine for PipelinePhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PipelinePhase::*;
        matches!(
            (self, target),
            (Idle, Analyzing)
                | (Analyzing, Synthesizing)
                | (Synthesizing, Saving)
                | (Saving, Succeeded)
                | (Analyzing, Failed)
                | (Synthesizing, Failed)
                | (Saving, Failed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PipelinePhase::*;
        match self {
            Idle => vec![Analyzing],
            Analyzing => vec![Synthesizing, Failed],
            Synthesizing => vec![Saving, Failed],
            Saving => vec![Succeeded, Failed],
            Succeeded | Failed => vec![],
        }
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PipelinePhase::Idle => "idle",
            PipelinePhase::Analyzing => "analyzing",
            PipelinePhase::Synthesizing => "synthesizing",
            PipelinePhase::Saving => "saving",
            PipelinePhase::Succeeded => "succeeded",
            PipelinePhase::Failed => "failed",
        };
        f.write_str(s)
    }
}
