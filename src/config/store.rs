//! Persistence backend configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which implementation backs the credit ledger, project store, and account
/// directory.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local state, lost on restart
    #[default]
    Memory,
    /// Remote document store over HTTP
    Http,
}

/// Persistence configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Document store base URL (required for the http backend)
    pub base_url: Option<String>,

    /// Bearer token for the document store
    pub api_key: Option<String>,
}

impl StoreConfig {
    /// Validate persistence configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StoreBackend::Http {
            let url = self
                .base_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or(ValidationError::MissingRequired("STORE__BASE_URL"))?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("document store"));
            }
        }
        Ok(())
    }
}
