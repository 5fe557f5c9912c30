//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod assistant;
pub mod redesign;

pub use account::{
    CreateSessionCommand, CreateSessionHandler, GetCurrentUserHandler, GetCurrentUserQuery,
};
pub use assistant::{
    AskAssistantCommand, AskAssistantHandler, AssistantReply, ASSISTANT_FALLBACK_REPLY,
};
pub use redesign::{
    GetBalanceHandler, GetBalanceQuery, ListProjectsHandler, ListProjectsQuery,
    RedesignPipelineConfig, RunRedesignCommand, RunRedesignHandler, RunRedesignResult,
    StudioSession, StudioState,
};
