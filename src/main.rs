//! Redesign Studio server entry point: loads configuration, initialises
//! logging, wires adapters, and serves the REST API.

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use redesign_studio::adapters::{
    studio_router, ConfiguredCredentialGate, DocumentStoreConfig, GeminiConfig, GeminiProvider,
    HttpDocumentStore, InMemoryStudioStore, StudioAppState,
};
use redesign_studio::application::{RedesignPipelineConfig, RunRedesignHandler};
use redesign_studio::config::{AppConfig, StoreBackend, StoreConfig};
use redesign_studio::domain::account::Credits;
use redesign_studio::ports::{AccountDirectory, CreditLedger, ProjectStore};

/// The three persistence ports, backed by one store.
struct Persistence {
    ledger: Arc<dyn CreditLedger>,
    projects: Arc<dyn ProjectStore>,
    directory: Arc<dyn AccountDirectory>,
}

fn build_persistence(
    store: &StoreConfig,
    initial_credits: Credits,
) -> Result<Persistence, Box<dyn std::error::Error>> {
    match store.backend {
        StoreBackend::Memory => {
            let memory = Arc::new(InMemoryStudioStore::new(initial_credits));
            Ok(Persistence {
                ledger: memory.clone(),
                projects: memory.clone(),
                directory: memory,
            })
        }
        StoreBackend::Http => {
            // validate() guarantees the URL for this backend
            let base_url = store.base_url.clone().unwrap_or_default();
            let remote = Arc::new(HttpDocumentStore::new(
                DocumentStoreConfig::new(base_url).with_api_key(store.api_key.clone()),
            )?);
            Ok(Persistence {
                ledger: remote.clone(),
                projects: remote.clone(),
                directory: remote,
            })
        }
    }
}

/// Re-arms the configured AI credential each time the process receives SIGHUP.
#[cfg(unix)]
fn rearm_on_sighup(gate: Arc<ConfiguredCredentialGate>) {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::hangup()) {
        Ok(mut hangups) => {
            tokio::spawn(async move {
                while hangups.recv().await.is_some() {
                    gate.rearm();
                }
            });
        }
        Err(e) => warn!(error = %e, "SIGHUP handler not installed; credential re-arm unavailable"),
    }
}

#[cfg(not(unix))]
fn rearm_on_sighup(_gate: Arc<ConfiguredCredentialGate>) {}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let result = if config.is_production() {
        fmt().with_env_filter(filter).json().try_init()
    } else {
        fmt().with_env_filter(filter).compact().try_init()
    };
    if let Err(e) = result {
        eprintln!("tracing init failed: {}", e);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let persistence = build_persistence(&config.store, Credits::new(config.credits.initial_balance))?;

    if !config.ai.has_api_key() {
        warn!("no AI API key configured; redesign runs will fail until one is set");
    }
    let gemini = Arc::new(GeminiProvider::new(
        GeminiConfig::new(config.ai.api_key.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_analysis_model(config.ai.analysis_model.clone())
            .with_synthesis_model(config.ai.synthesis_model.clone())
            .with_timeout(config.ai.timeout()),
    )?);
    let credential_gate = Arc::new(ConfiguredCredentialGate::new(config.ai.has_api_key()));
    rearm_on_sighup(credential_gate.clone());

    let redesign_handler = Arc::new(RunRedesignHandler::with_config(
        gemini.clone(),
        gemini.clone(),
        credential_gate,
        persistence.ledger.clone(),
        persistence.projects.clone(),
        RedesignPipelineConfig {
            max_image_bytes: config.server.max_upload_bytes,
        },
    ));

    let state = StudioAppState {
        redesign_handler,
        ledger: persistence.ledger,
        project_store: persistence.projects,
        directory: persistence.directory,
        assistant: gemini,
    };

    let app = studio_router(state, config.server.max_body_bytes()).layer(TimeoutLayer::new(
        std::time::Duration::from_secs(config.server.request_timeout_secs),
    ));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(
        %addr,
        environment = ?config.server.environment,
        store = ?config.store.backend,
        "redesign studio listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
