//! Trait definitions for external interactions
//!
//! These traits define the boundary between analysis logic and infrastructure.
//! Infrastructure implementations live in other crates.

/// A schema-constrained generation request
///
/// Carries everything the remote service needs to produce JSON-only output
/// that conforms to a response schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredRequest {
    /// Persona and rules for the model
    pub system_instruction: String,

    /// User prompt, including the report text
    pub prompt: String,

    /// Response schema as JSON text
    pub response_schema: String,
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (medreport-llm). Calls are
/// synchronous: one blocking request per invocation.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate JSON text conforming to `request.response_schema`
    fn generate_structured(&self, request: &StructuredRequest) -> Result<String, Self::Error>;
}

impl<T> LlmProvider for Box<T>
where
    T: LlmProvider + ?Sized,
{
    type Error = T::Error;

    fn generate_structured(&self, request: &StructuredRequest) -> Result<String, Self::Error> {
        (**self).generate_structured(request)
    }
}
