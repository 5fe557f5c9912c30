//! Persisted record of one completed redesign.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ProjectId, Timestamp, UserId, ValidationError};

use super::{DesignStyle, RoomAnalysis, RoomImage};

/// One completed redesign run. Created exactly once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedesignProject {
    id: ProjectId,
    user_id: UserId,
    original_image: RoomImage,
    redesigned_image: RoomImage,
    style: DesignStyle,
    room_type: String,
    analysis: String,
    created_at: Timestamp,
}

impl RedesignProject {
    /// Assembles the record from a finished run. `room_type` is copied from
    /// the analysis and the analysis is stored serialized.
    pub fn from_run(
        user_id: UserId,
        original_image: RoomImage,
        redesigned_image: RoomImage,
        style: DesignStyle,
        analysis: &RoomAnalysis,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: ProjectId::new(),
            user_id,
            original_image,
            redesigned_image,
            style,
            room_type: analysis.room_type().to_string(),
            analysis: analysis.to_json(),
            created_at,
        }
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn original_image(&self) -> &RoomImage {
        &self.original_image
    }

    pub fn redesigned_image(&self) -> &RoomImage {
        &self.redesigned_image
    }

    pub fn style(&self) -> DesignStyle {
        self.style
    }

    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    /// Serialized analysis as stored.
    pub fn analysis_json(&self) -> &str {
        &self.analysis
    }

    /// Deserializes the stored analysis.
    pub fn analysis(&self) -> Result<RoomAnalysis, ValidationError> {
        RoomAnalysis::from_json(&self.analysis)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Orders a history newest first. Ties keep a stable order by id so repeated
/// listings are identical.
pub fn sort_newest_first(projects: &mut [RedesignProject]) {
    projects.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    });
}
