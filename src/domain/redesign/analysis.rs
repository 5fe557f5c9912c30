//! Structural assessment of a room photo.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Room assessment produced once per run by the analyzer.
///
/// Immutable after construction; the synthesizer is conditioned on it and the
/// project record stores its serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAnalysis {
    room_type: String,
    lighting: String,
    potential_improvements: Vec<String>,
    #[serde(default)]
    furniture_ideas: Vec<String>,
    /// Free-text budget estimate, in INR as the analyzer is asked for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    estimated_budget: Option<String>,
}

impl RoomAnalysis {
    /// Creates an analysis. `room_type` must be non-empty; an empty
    /// improvement list is tolerated.
    pub fn new(
        room_type: impl Into<String>,
        lighting: impl Into<String>,
        potential_improvements: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let room_type = room_type.into().trim().to_string();
        if room_type.is_empty() {
            return Err(ValidationError::empty_field("roomType"));
        }
        Ok(Self {
            room_type,
            lighting: lighting.into(),
            potential_improvements,
            furniture_ideas: Vec::new(),
            estimated_budget: None,
        })
    }

    pub fn with_furniture_ideas(mut self, ideas: Vec<String>) -> Self {
        self.furniture_ideas = ideas;
        self
    }

    /// Blank estimates are dropped.
    pub fn with_estimated_budget(mut self, budget: impl Into<String>) -> Self {
        let budget = budget.into().trim().to_string();
        self.estimated_budget = (!budget.is_empty()).then_some(budget);
        self
    }

    /// Parses the JSON document returned by an analyzer, enforcing the same
    /// invariants as [`RoomAnalysis::new`].
    pub fn from_json(raw: &str) -> Result<Self, ValidationError> {
        let parsed: RoomAnalysis = serde_json::from_str(raw)
            .map_err(|e| ValidationError::invalid_format("analysis", e.to_string()))?;
        let analysis = Self::new(parsed.room_type, parsed.lighting, parsed.potential_improvements)?
            .with_furniture_ideas(parsed.furniture_ideas);
        Ok(match parsed.estimated_budget {
            Some(budget) => analysis.with_estimated_budget(budget),
            None => analysis,
        })
    }

    pub fn room_type(&self) -> &str {
        &self.room_type
    }

    pub fn lighting(&self) -> &str {
        &self.lighting
    }

    pub fn potential_improvements(&self) -> &[String] {
        &self.potential_improvements
    }

    pub fn furniture_ideas(&self) -> &[String] {
        &self.furniture_ideas
    }

    pub fn estimated_budget(&self) -> Option<&str> {
        self.estimated_budget.as_deref()
    }

    /// Serialized form stored on the project record.
    pub fn to_json(&self) -> String {
        // Plain strings only, serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
