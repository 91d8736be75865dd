//! Medreport Server
//!
//! HTTP front end for medical report analysis. Accepts PDF uploads and
//! free-text chat messages, extracts report text and returns a validated
//! structured analysis.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState, SharedProvider};
use medreport_analyzer::Analyzer;
use medreport_extractor::PdfTextExtractor;
use medreport_llm::{GeminiProvider, LlmError};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// LLM provider could not be created
    #[error("Failed to create LLM provider: {0}")]
    Provider(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared application state from configuration
///
/// Must run outside the async runtime: the provider owns a blocking HTTP
/// client. A missing API key is logged, not fatal; analysis calls fail
/// until one is set.
pub fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
    let provider = GeminiProvider::new(config.llm.clone())?;
    let api_key_configured = provider.has_api_key();
    if !api_key_configured {
        warn!(
            "API key not found in ${}; analysis requests will fail",
            config.llm.api_key_env
        );
    }

    let provider: SharedProvider = Box::new(provider);
    Ok(state_with_provider(config, provider, api_key_configured))
}

/// Build application state around an existing provider
pub fn state_with_provider(
    config: &ServerConfig,
    provider: SharedProvider,
    api_key_configured: bool,
) -> AppState {
    let analyzer = Analyzer::new(provider, config.analyzer.clone())
        .with_model_name(config.llm.model.clone());

    AppState {
        analyzer: Arc::new(analyzer),
        extractor: PdfTextExtractor::new(),
        api_key_configured,
        max_upload_bytes: config.max_upload_bytes,
    }
}

/// Serve HTTP until interrupted
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), ServerError> {
    info!("Starting Medreport server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {}", config.llm.model);
    info!("Upload limit: {} bytes", config.max_upload_bytes);

    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreport_llm::MockProvider;

    #[test]
    fn test_state_with_provider() {
        let config = ServerConfig::default_config();
        let state = state_with_provider(&config, Box::new(MockProvider::new("{}")), true);

        assert!(state.api_key_configured);
        assert_eq!(state.max_upload_bytes, config.max_upload_bytes);
        assert_eq!(state.analyzer.model_name(), "gemini-2.5-pro");
    }

    #[test]
    fn test_build_state_without_key() {
        let mut config = ServerConfig::default_config();
        config.llm.api_key_env = "MEDREPORT_TEST_UNSET_KEY_VAR".to_string();

        let state = build_state(&config).unwrap();
        assert!(!state.api_key_configured);
    }
}
