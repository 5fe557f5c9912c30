//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    // Account handlers
    CreateSessionCommand, CreateSessionHandler, GetCurrentUserHandler, GetCurrentUserQuery,
    // Assistant handlers
    AskAssistantCommand, AskAssistantHandler, AssistantReply, ASSISTANT_FALLBACK_REPLY,
    // Redesign handlers
    GetBalanceHandler, GetBalanceQuery, ListProjectsHandler, ListProjectsQuery,
    RedesignPipelineConfig, RunRedesignCommand, RunRedesignHandler, RunRedesignResult,
    StudioSession, StudioState,
};
