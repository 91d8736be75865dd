//! Error types for the Analyzer

use thiserror::Error;

/// Outcome of an analysis that did not produce a `MedicalAnalysis`
///
/// Transport, service and schema failures are deliberately collapsed into
/// `Failed`: callers show the message and may resubmit, nothing more.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No report text to analyze
    #[error("Input text is empty. Cannot analyze.")]
    EmptyInput,

    /// The remote call or response validation failed
    #[error("AI Analysis Failed: {0}")]
    Failed(String),
}
