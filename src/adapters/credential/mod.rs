//! Credential Gate Adapters.
//!
//! - `MockCredentialGate` - Scriptable gate for tests
//! - `ConfiguredCredentialGate` - Gate backed by the server's configured API key

mod configured_gate;
mod mock_gate;

pub use configured_gate::ConfiguredCredentialGate;
pub use mock_gate::MockCredentialGate;
