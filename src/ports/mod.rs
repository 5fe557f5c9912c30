//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## AI Ports
//!
//! - `RoomAnalyzer` - Structural assessment of a room photo
//! - `RoomSynthesizer` - Redesigned image conditioned on the analysis
//! - `CredentialGate` - Whether an AI credential is selected, and how to pick one
//! - `AssistantChat` - Single-turn design assistant
//!
//! ## Persistence Ports
//!
//! - `CreditLedger` - Credit balance, debited once per successful run
//! - `ProjectStore` - Append-only redesign history
//! - `AccountDirectory` - Current user lookup and session creation

mod account_directory;
mod assistant_chat;
mod credential_gate;
mod credit_ledger;
mod project_store;
mod room_analyzer;
mod room_synthesizer;

pub use account_directory::AccountDirectory;
pub use assistant_chat::AssistantChat;
pub use credential_gate::CredentialGate;
pub use credit_ledger::CreditLedger;
pub use project_store::ProjectStore;
pub use room_analyzer::RoomAnalyzer;
pub use room_synthesizer::RoomSynthesizer;
