//! AI service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key. Without one the credential gate reports no credential
    /// and every AI call fails as an invalid credential.
    pub api_key: Option<String>,

    /// Base URL of the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for room analysis
    #[serde(default = "default_analysis_model")]
    pub analysis_model: String,

    /// Model used for redesigned image synthesis
    #[serde(default = "default_synthesis_model")]
    pub synthesis_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("AI base"));
        }
        if self.analysis_model.trim().is_empty() || self.synthesis_model.trim().is_empty() {
            return Err(ValidationError::EmptyModelName);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            analysis_model: default_analysis_model(),
            synthesis_model: default_synthesis_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_analysis_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_synthesis_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_timeout() -> u64 {
    120
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_without_key() {
        let config = AiConfig::default();
        assert!(!config.has_api_key());
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_empty_key_counts_as_absent() {
        let config = AiConfig {
            api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidAiTimeout)
        ));
    }

    #[test]
    fn test_base_url_must_be_http() {
        let config = AiConfig {
            base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_model_names_required() {
        let config = AiConfig {
            synthesis_model: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::EmptyModelName)
        ));
    }
}
