//! Assistant handlers - single-turn design questions.

mod ask_assistant;

pub use ask_assistant::{
    AskAssistantCommand, AskAssistantHandler, AssistantReply, ASSISTANT_FALLBACK_REPLY,
    MAX_QUESTION_CHARS,
};
