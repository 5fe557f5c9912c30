//! Redesign domain - styles, images, analyses, projects, and the pipeline
//! lifecycle and error taxonomy.

mod analysis;
mod classifier;
mod errors;
mod image;
mod phase;
mod project;
mod style;

pub use analysis::RoomAnalysis;
pub use classifier::ErrorClassifier;
pub use errors::{ClassifiedError, RedesignError, ServiceFailure};
pub use image::{ImageFormat, RoomImage};
pub use phase::PipelinePhase;
pub use project::{sort_newest_first, RedesignProject};
pub use style::DesignStyle;
