//! AssistantChat port - Free-form interior design questions.
//!
//! One message in, one reply out. No conversation history is kept.

use async_trait::async_trait;

use crate::domain::redesign::ServiceFailure;

/// Port for the design assistant collaborator.
#[async_trait]
pub trait AssistantChat: Send + Sync {
    /// Answer `message` in the assistant persona.
    async fn reply(&self, message: &str) -> Result<String, ServiceFailure>;
}
