//! Credential gate for a server holding its own API key.
//!
//! There is no interactive picker on a server, so `request_credential` only
//! logs. Once the AI service rejects the key the gate stays absent until an
//! operator re-arms it (the binary does this on SIGHUP after the key has been
//! fixed upstream).

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

use crate::ports::CredentialGate;

#[derive(Debug)]
pub struct ConfiguredCredentialGate {
    key_present: bool,
    selected: AtomicBool,
}

impl ConfiguredCredentialGate {
    pub fn new(key_present: bool) -> Self {
        Self {
            key_present,
            selected: AtomicBool::new(key_present),
        }
    }

    /// Operator action: trust the configured key again. Returns whether the
    /// gate now reports a credential.
    pub fn rearm(&self) -> bool {
        if !self.key_present {
            warn!("cannot re-arm AI credential: no API key configured");
            return false;
        }
        if !self.selected.swap(true, Ordering::SeqCst) {
            info!("configured AI credential re-armed");
        }
        true
    }
}

#[async_trait]
impl CredentialGate for ConfiguredCredentialGate {
    async fn has_credential(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    async fn request_credential(&self) {
        if self.key_present {
            warn!("AI credential needs operator attention; fix the key and send SIGHUP to re-arm");
        } else {
            warn!("no AI API key configured; set REDESIGN_STUDIO__AI__API_KEY");
        }
    }

    fn mark_absent(&self) {
        if self.selected.swap(false, Ordering::SeqCst) {
            warn!("configured AI credential marked absent");
        }
    }
}
