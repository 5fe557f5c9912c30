//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `REDESIGN_STUDIO` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use redesign_studio::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod ai;
mod credits;
mod error;
mod server;
mod store;

pub use ai::AiConfig;
pub use credits::CreditsConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// development server backed by the in-memory store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// AI service configuration (Gemini key and models)
    #[serde(default)]
    pub ai: AiConfig,

    /// Persistence backend
    #[serde(default)]
    pub store: StoreConfig,

    /// Credit policy
    #[serde(default)]
    pub credits: CreditsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REDESIGN_STUDIO` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REDESIGN_STUDIO__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `REDESIGN_STUDIO__AI__API_KEY=...` -> `ai.api_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REDESIGN_STUDIO")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "REDESIGN_STUDIO__SERVER__PORT",
        "REDESIGN_STUDIO__SERVER__ENVIRONMENT",
        "REDESIGN_STUDIO__AI__API_KEY",
        "REDESIGN_STUDIO__AI__ANALYSIS_MODEL",
        "REDESIGN_STUDIO__STORE__BACKEND",
        "REDESIGN_STUDIO__STORE__BASE_URL",
        "REDESIGN_STUDIO__CREDITS__INITIAL_BALANCE",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_load_with_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.credits.initial_balance, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("REDESIGN_STUDIO__SERVER__PORT", "3000");
        env::set_var("REDESIGN_STUDIO__AI__API_KEY", "test-key");
        env::set_var("REDESIGN_STUDIO__AI__ANALYSIS_MODEL", "gemini-test");
        env::set_var("REDESIGN_STUDIO__CREDITS__INITIAL_BALANCE", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.ai.has_api_key());
        assert_eq!(config.ai.analysis_model, "gemini-test");
        assert_eq!(config.credits.initial_balance, 5);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("REDESIGN_STUDIO__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_http_store_without_url_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("REDESIGN_STUDIO__STORE__BACKEND", "http");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.store.backend, StoreBackend::Http);
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_http_store_with_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("REDESIGN_STUDIO__STORE__BACKEND", "http");
        env::set_var("REDESIGN_STUDIO__STORE__BASE_URL", "https://store.example.com");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }
}
