//! Mock credential gate.
//!
//! `request_credential` only counts invocations. Tests flip the selection
//! explicitly with `set_selected`.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::ports::CredentialGate;

#[derive(Debug, Default)]
pub struct MockCredentialGate {
    selected: AtomicBool,
    requests: AtomicUsize,
}

impl MockCredentialGate {
    /// A gate with a credential already selected.
    pub fn selected() -> Self {
        Self {
            selected: AtomicBool::new(true),
            requests: AtomicUsize::new(0),
        }
    }

    /// A gate with nothing selected.
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    pub fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    /// Number of times the selection flow was opened.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialGate for MockCredentialGate {
    async fn has_credential(&self) -> bool {
        self.is_selected()
    }

    async fn request_credential(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn mark_absent(&self) {
        self.set_selected(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mark_absent_clears_selection() {
        let gate = MockCredentialGate::selected();
        assert!(gate.has_credential().await);

        gate.mark_absent();

        assert!(!gate.has_credential().await);
    }

    #[tokio::test]
    async fn request_is_counted_but_does_not_select() {
        let gate = MockCredentialGate::absent();
        gate.request_credential().await;
        gate.request_credential().await;

        assert_eq!(gate.request_count(), 2);
        assert!(!gate.is_selected());
    }
}
