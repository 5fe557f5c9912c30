//! Redesign handlers - the pipeline run plus history and balance queries.

mod get_balance;
mod list_projects;
mod run_redesign;
mod studio_session;

pub use get_balance::{GetBalanceHandler, GetBalanceQuery};
pub use list_projects::{ListProjectsHandler, ListProjectsQuery};
pub use run_redesign::{
    RedesignPipelineConfig, RunRedesignCommand, RunRedesignHandler, RunRedesignResult,
};
pub use studio_session::{StudioSession, StudioState};
