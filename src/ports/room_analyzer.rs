//! RoomAnalyzer port - Structural assessment of a room photo.
//!
//! First of the two AI calls in a redesign run. Implementations send the
//! image and target style to an AI service and return the parsed
//! [`RoomAnalysis`]. Failures are returned raw; the pipeline classifies them.

use async_trait::async_trait;

use crate::domain::redesign::{DesignStyle, RoomAnalysis, RoomImage, ServiceFailure};

/// Port for the room analysis collaborator.
#[async_trait]
pub trait RoomAnalyzer: Send + Sync {
    /// Assess the room in `image` with `style` as the redesign target.
    async fn analyze(
        &self,
        image: &RoomImage,
        style: DesignStyle,
    ) -> Result<RoomAnalysis, ServiceFailure>;
}
