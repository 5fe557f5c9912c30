//! AI Service Adapters.
//!
//! Implementations of the `RoomAnalyzer`, `RoomSynthesizer`, and
//! `AssistantChat` ports.
//!
//! ## Available Adapters
//!
//! - `MockRoomAnalyzer` / `MockRoomSynthesizer` / `MockAssistant` - Configurable mocks for testing
//! - `GeminiProvider` - Google Gemini models over the REST API

mod gemini_provider;
mod mock_services;

pub use gemini_provider::{GeminiConfig, GeminiProvider, ANALYSIS_SCHEMA};
pub use mock_services::{
    AnalysisCall, MockAssistant, MockRoomAnalyzer, MockRoomSynthesizer, SynthesisCall,
};
