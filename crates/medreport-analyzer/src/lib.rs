//! Medreport Analyzer
//!
//! Turns free-text medical reports into a validated `MedicalAnalysis` using a
//! schema-constrained LLM call.
//!
//! # Overview
//!
//! ```text
//! Text → PromptBuilder → LlmProvider (JSON mode + schema) → parser → MedicalAnalysis
//! ```
//!
//! Every call ends in exactly one of three ways:
//!
//! - **Rejected**: empty input, the provider is never contacted
//! - **Validated**: the response parsed against the full schema
//! - **Failed**: transport, service or schema error, with a readable message
//!
//! There are no retries and no partially populated results.
//!
//! # Example Usage
//!
//! ```
//! use medreport_analyzer::{Analyzer, AnalyzerConfig, AnalysisError};
//! use medreport_llm::MockProvider;
//!
//! let llm = MockProvider::new(r#"{
//!     "severity_analysis": "Moderate",
//!     "key_abnormal_findings": ["Blood pressure is elevated (BP 160/100)"],
//!     "precautions_and_next_steps": ["Reduce salt intake"],
//!     "medication_suggestion": "CONSULT A DOCTOR. This AI cannot prescribe medications.",
//!     "physician_recommendation": "Book a routine appointment.",
//!     "recommended_doctor_type": "General Practitioner"
//! }"#);
//! let analyzer = Analyzer::new(llm, AnalyzerConfig::default());
//!
//! let analysis = analyzer.analyze("BP 160/100").unwrap();
//! assert_eq!(analysis.key_abnormal_findings().len(), 1);
//!
//! assert!(matches!(analyzer.analyze(""), Err(AnalysisError::EmptyInput)));
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod error;
mod parser;
mod prompt;
mod schema;


pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use error::AnalysisError;
pub use parser::parse_analysis_response;
pub use prompt::{PromptBuilder, SYSTEM_INSTRUCTION};
pub use schema::response_schema;
