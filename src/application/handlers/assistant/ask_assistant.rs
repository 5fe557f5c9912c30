//! AskAssistantHandler - One question to the design assistant.
//!
//! Assistant failures never reach the caller as errors: they are logged and
//! answered with a fixed fallback reply. Only a malformed question is an error.

use std::sync::Arc;

use tracing::warn;

use crate::domain::foundation::ValidationError;
use crate::ports::AssistantChat;

/// Reply sent when the assistant cannot answer.
pub const ASSISTANT_FALLBACK_REPLY: &str = "Assistant unavailable right now.";

/// Longest accepted question, in characters.
pub const MAX_QUESTION_CHARS: usize = 4000;

#[derive(Debug, Clone)]
pub struct AskAssistantCommand {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub reply: String,
    /// True when `reply` is the fallback rather than a model answer.
    pub fallback: bool,
}

pub struct AskAssistantHandler {
    assistant: Arc<dyn AssistantChat>,
}

impl AskAssistantHandler {
    pub fn new(assistant: Arc<dyn AssistantChat>) -> Self {
        Self { assistant }
    }

    pub async fn handle(&self, cmd: AskAssistantCommand) -> Result<AssistantReply, ValidationError> {
        let message = cmd.message.trim();
        if message.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        let chars = message.chars().count();
        if chars > MAX_QUESTION_CHARS {
            return Err(ValidationError::too_large(
                "message",
                MAX_QUESTION_CHARS as u64,
                chars as u64,
            ));
        }

        match self.assistant.reply(message).await {
            Ok(reply) => Ok(AssistantReply {
                reply,
                fallback: false,
            }),
            Err(failure) => {
                warn!(status = ?failure.status, message = %failure.message, "assistant call failed");
                Ok(AssistantReply {
                    reply: ASSISTANT_FALLBACK_REPLY.to_string(),
                    fallback: true,
                })
            }
        }
    }
}
