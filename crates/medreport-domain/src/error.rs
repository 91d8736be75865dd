//! Schema validation errors

use thiserror::Error;

/// Reasons a JSON payload is not a valid `MedicalAnalysis`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Payload is not parseable JSON
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),

    /// Payload is JSON but not an object
    #[error("Expected a JSON object")]
    NotAnObject,

    /// A required field is absent
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    /// A field is present with the wrong JSON type
    #[error("Field '{field}' must be {expected}")]
    WrongType {
        /// Field name
        field: &'static str,
        /// Description of the expected type
        expected: &'static str,
    },

    /// `severity_analysis` is outside the closed set
    #[error("Unknown severity_analysis value: {0:?}")]
    UnknownSeverity(String),

    /// `recommended_doctor_type` is outside the closed set
    #[error("Unknown recommended_doctor_type value: {0:?}")]
    UnknownDoctorType(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::MalformedJson(e.to_string())
    }
}
