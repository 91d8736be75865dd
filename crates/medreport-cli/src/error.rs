//! Error types for the CLI application.

use medreport_analyzer::AnalysisError;
use medreport_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM provider could not be created
    #[error("Provider error: {0}")]
    Provider(#[from] LlmError),

    /// Analysis error (message is shown as-is)
    #[error("{0}")]
    Analysis(#[from] AnalysisError),

    /// No text could be extracted (message is shown as-is)
    #[error("{0}")]
    Extraction(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
