//! RoomSynthesizer port - Image synthesis conditioned on an analysis.
//!
//! Second AI call of a run. Taking `&RoomAnalysis` as input means a
//! synthesis cannot be requested before an analysis exists.

use async_trait::async_trait;

use crate::domain::redesign::{DesignStyle, RoomAnalysis, RoomImage, ServiceFailure};

/// Port for the redesigned-image generator.
#[async_trait]
pub trait RoomSynthesizer: Send + Sync {
    /// Produce a new image of the same room restyled as `style`.
    async fn synthesize(
        &self,
        image: &RoomImage,
        style: DesignStyle,
        analysis: &RoomAnalysis,
    ) -> Result<RoomImage, ServiceFailure>;
}
