//! HTTP DTOs for the studio endpoints.
//!
//! Images travel as base64. Requests carry a MIME type plus raw base64;
//! responses carry `data:` URLs that a browser can display directly.

use serde::{Deserialize, Serialize};

use crate::application::handlers::RunRedesignResult;
use crate::domain::account::UserAccount;
use crate::domain::foundation::ValidationError;
use crate::domain::redesign::{DesignStyle, RedesignProject, RoomAnalysis, RoomImage};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Question for the design assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct AssistantChatRequest {
    pub message: String,
}

/// Request to open a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub email: String,
    pub name: String,
}

/// Uploaded room photo.
///
/// The format comes from `mime_type` when it names an accepted image type,
/// otherwise from the extension of `filename`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePayload {
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub filename: Option<String>,
    pub data_base64: String,
}

impl ImagePayload {
    pub fn into_image(self) -> Result<RoomImage, ValidationError> {
        RoomImage::from_upload(&self.mime_type, self.filename.as_deref(), &self.data_base64)
    }
}

/// Request to redesign one room photo.
#[derive(Debug, Clone, Deserialize)]
pub struct RedesignRequest {
    pub image: ImagePayload,
    /// Style identifier from the catalog.
    pub style: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccountResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub credits: u32,
}

impl From<UserAccount> for UserAccountResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id.to_string(),
            email: account.email,
            name: account.name,
            credits: account.credits.value(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditsResponse {
    pub credits: u32,
}

/// Assistant answer, or the fallback reply when the assistant failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantChatResponse {
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<DesignStyle> for StyleResponse {
    fn from(style: DesignStyle) -> Self {
        Self {
            id: style.as_str().to_string(),
            name: style.display_name().to_string(),
            description: style.prompt_description().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub style: String,
    pub room_type: String,
    /// Parsed analysis; `None` if the stored text no longer parses.
    pub analysis: Option<RoomAnalysis>,
    pub original_image: String,
    pub redesigned_image: String,
    pub created_at: String,
}

impl From<&RedesignProject> for ProjectResponse {
    fn from(project: &RedesignProject) -> Self {
        Self {
            id: project.id().to_string(),
            style: project.style().as_str().to_string(),
            room_type: project.room_type().to_string(),
            analysis: project.analysis().ok(),
            original_image: project.original_image().to_data_url(),
            redesigned_image: project.redesigned_image().to_data_url(),
            created_at: project.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedesignResponse {
    pub project: ProjectResponse,
    pub remaining_credits: Option<u32>,
    /// False when the project was saved but the debit did not go through.
    pub credit_charged: bool,
}

impl From<RunRedesignResult> for RedesignResponse {
    fn from(result: RunRedesignResult) -> Self {
        Self {
            project: ProjectResponse::from(&result.project),
            remaining_credits: result.remaining_credits.map(|c| c.value()),
            credit_charged: result.credit_charged,
        }
    }
}
