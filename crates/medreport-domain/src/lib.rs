//! Medreport Domain Layer
//!
//! This crate contains the domain model for Medreport and the trait boundary
//! between the analysis logic and the remote LLM service.
//!
//! ## Key Concepts
//!
//! - **MedicalAnalysis**: The structured result of analyzing one report
//! - **Severity**: Closed set of urgency labels (Low → Critical)
//! - **DoctorType**: Closed set of specialist categories
//! - **Schema validation**: An analysis only exists once every field has been
//!   checked against the closed sets
//!
//! ## Architecture
//!
//! - Pure data and validation, no I/O
//! - Infrastructure implementations (HTTP clients, PDF parsing) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod doctor;
pub mod error;
pub mod severity;
pub mod traits;

// Re-exports for convenience
pub use analysis::{MedicalAnalysis, MEDICATION_DISCLAIMER};
pub use doctor::DoctorType;
pub use error::SchemaError;
pub use severity::Severity;
pub use traits::{LlmProvider, StructuredRequest};
