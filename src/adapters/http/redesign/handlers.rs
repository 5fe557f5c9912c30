//! HTTP handlers for the studio endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireUser;
use crate::application::handlers::{
    AskAssistantCommand, AskAssistantHandler, CreateSessionCommand, CreateSessionHandler, GetBalanceHandler, GetBalanceQuery,
    GetCurrentUserHandler, GetCurrentUserQuery, ListProjectsHandler, ListProjectsQuery,
    RunRedesignCommand, RunRedesignHandler,
};
use crate::domain::account::Identity;
use crate::domain::redesign::DesignStyle;
use crate::ports::{AccountDirectory, AssistantChat, CreditLedger, ProjectStore};

use super::dto::{
    AssistantChatRequest, AssistantChatResponse, CreateSessionRequest, CreditsResponse, ProjectResponse, RedesignRequest, RedesignResponse,
    StyleResponse, UserAccountResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// The redesign handler is shared rather than built per request because it
/// owns the per-user in-flight set.
#[derive(Clone)]
pub struct StudioAppState {
    pub redesign_handler: Arc<RunRedesignHandler>,
    pub ledger: Arc<dyn CreditLedger>,
    pub project_store: Arc<dyn ProjectStore>,
    pub directory: Arc<dyn AccountDirectory>,
    pub assistant: Arc<dyn AssistantChat>,
}

impl StudioAppState {
    pub fn assistant_handler(&self) -> AskAssistantHandler {
        AskAssistantHandler::new(self.assistant.clone())
    }

    pub fn create_session_handler(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(self.directory.clone())
    }

    pub fn current_user_handler(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.directory.clone())
    }

    pub fn balance_handler(&self) -> GetBalanceHandler {
        GetBalanceHandler::new(self.ledger.clone())
    }

    pub fn list_projects_handler(&self) -> ListProjectsHandler {
        ListProjectsHandler::new(self.project_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/me - Current user's account
pub async fn get_current_user(
    State(state): State<StudioAppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, ApiError> {
    let account = state
        .current_user_handler()
        .handle(GetCurrentUserQuery { user_id: user.id })
        .await?;
    Ok(Json(UserAccountResponse::from(account)))
}

/// GET /api/credits - Authoritative credit balance
pub async fn get_credits(
    State(state): State<StudioAppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, ApiError> {
    let credits = state
        .balance_handler()
        .handle(GetBalanceQuery { user_id: user.id })
        .await?;
    Ok(Json(CreditsResponse {
        credits: credits.value(),
    }))
}

/// GET /api/projects - Redesign history, newest first
pub async fn list_projects(
    State(state): State<StudioAppState>,
    RequireUser(user): RequireUser,
) -> Result<impl IntoResponse, ApiError> {
    let projects = state
        .list_projects_handler()
        .handle(ListProjectsQuery { user_id: user.id })
        .await?;
    let response: Vec<ProjectResponse> = projects.iter().map(ProjectResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/styles - Style catalog in display order
pub async fn list_styles() -> impl IntoResponse {
    let styles: Vec<StyleResponse> = DesignStyle::CATALOG
        .iter()
        .copied()
        .map(StyleResponse::from)
        .collect();
    Json(styles)
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Open or resume an account
pub async fn create_session(
    State(state): State<StudioAppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let identity = Identity::new(request.email, request.name)?;
    let account = state
        .create_session_handler()
        .handle(CreateSessionCommand { identity })
        .await?;
    Ok((StatusCode::CREATED, Json(UserAccountResponse::from(account))))
}

/// POST /api/assistant/chat - Ask the design assistant one question
///
/// Answers 200 with the fallback reply when the assistant fails.
pub async fn ask_assistant(
    State(state): State<StudioAppState>,
    Json(request): Json<AssistantChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let answer = state
        .assistant_handler()
        .handle(AskAssistantCommand {
            message: request.message,
        })
        .await?;
    Ok(Json(AssistantChatResponse {
        reply: answer.reply,
    }))
}

/// POST /api/redesigns - Run the redesign pipeline once
///
/// The run is spawned so a client disconnect does not cancel it midway; an
/// abandoned run completes or fails on its own.
pub async fn create_redesign(
    State(state): State<StudioAppState>,
    RequireUser(user): RequireUser,
    Json(request): Json<RedesignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let image = request.image.into_image()?;
    let command = RunRedesignCommand::new(user.id, image, request.style);

    let handler = state.redesign_handler.clone();
    let result = tokio::spawn(async move { handler.handle(command).await })
        .await
        .map_err(|e| ApiError::Internal(format!("redesign task failed: {}", e)))??;

    Ok((StatusCode::CREATED, Json(RedesignResponse::from(result))))
}
