//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Gemini analyzer/synthesizer and test mocks
//! - `credential` - Credential gates
//! - `memory` - In-memory ledger, project store, and account directory
//! - `document_store` - Remote document store over HTTP
//! - `http` - Axum REST API

pub mod ai;
pub mod credential;
pub mod document_store;
pub mod http;
pub mod memory;

pub use ai::{GeminiConfig, GeminiProvider, MockAssistant, MockRoomAnalyzer, MockRoomSynthesizer};
pub use credential::{ConfiguredCredentialGate, MockCredentialGate};
pub use document_store::{DocumentStoreConfig, HttpDocumentStore};
pub use http::{studio_router, StudioAppState};
pub use memory::InMemoryStudioStore;
