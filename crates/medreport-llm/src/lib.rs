//! Medreport LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `medreport-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `GeminiProvider`: Google Gemini `generateContent` with a response schema
//!
//! # Examples
//!
//! ```
//! use medreport_llm::MockProvider;
//! use medreport_domain::{LlmProvider, StructuredRequest};
//!
//! let provider = MockProvider::new(r#"{"ok": true}"#);
//! let request = StructuredRequest {
//!     system_instruction: "Be careful.".to_string(),
//!     prompt: "test prompt".to_string(),
//!     response_schema: "{}".to_string(),
//! };
//! assert_eq!(provider.generate_structured(&request).unwrap(), r#"{"ok": true}"#);
//! assert_eq!(provider.call_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod gemini;

use medreport_domain::{LlmProvider, StructuredRequest};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use gemini::{GeminiConfig, GeminiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or transport error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Service answered but the payload could not be used
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// No API key was configured
    #[error("API key not configured (set {0})")]
    MissingApiKey(String),

    /// Service returned an error status
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message reported by the service
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockResponse {
    Text(String),
    Error(String),
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls, and
/// records how often it was invoked so tests can assert on call counts.
///
/// # Examples
///
/// ```
/// use medreport_llm::MockProvider;
/// use medreport_domain::{LlmProvider, StructuredRequest};
///
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// provider.add_error("prompt2", "quota exhausted");
///
/// let request = |prompt: &str| StructuredRequest {
///     system_instruction: String::new(),
///     prompt: prompt.to_string(),
///     response_schema: String::new(),
/// };
/// assert_eq!(provider.generate_structured(&request("prompt1")).unwrap(), "response1");
/// assert!(provider.generate_structured(&request("prompt2")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: MockResponse,
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<StructuredRequest>>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self::with_default(MockResponse::Text(response.into()))
    }

    /// Create a MockProvider that fails every call with the given message
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockResponse::Error(message.into()))
    }

    fn with_default(default_response: MockResponse) -> Self {
        Self {
            default_response,
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MockResponse::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>, message: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(prompt.into(), MockResponse::Error(message.into()));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }

    /// The most recent request received, if any
    pub fn last_request(&self) -> Option<StructuredRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProvider for MockProvider {
    type Error = LlmError;

    fn generate_structured(&self, request: &StructuredRequest) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;
        *self.last_request.lock().unwrap() = Some(request.clone());

        let responses = self.responses.lock().unwrap();
        let response = responses
            .get(&request.prompt)
            .unwrap_or(&self.default_response);

        match response {
            MockResponse::Text(text) => Ok(text.clone()),
            MockResponse::Error(message) => Err(LlmError::Other(message.clone())),
        }
    }
}
