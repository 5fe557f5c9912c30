//! CredentialGate port - Selection state of the AI-service credential.
//!
//! The host environment may offer an interactive way to pick a credential
//! (a key picker, a settings dialog). Where it doesn't, implementations make
//! `request_credential` a no-op.

use async_trait::async_trait;

#[async_trait]
pub trait CredentialGate: Send + Sync {
    /// Whether a usable credential is currently selected.
    async fn has_credential(&self) -> bool;

    /// Open the interactive selection flow. May wait on the user.
    ///
    /// Idempotent: calling it while a credential is selected is harmless.
    async fn request_credential(&self);

    /// Forget the cached selection so `has_credential` reports false until a
    /// new credential is chosen.
    fn mark_absent(&self);
}
