//! Gemini Provider Implementation
//!
//! Calls Google's `generateContent` endpoint with JSON mode and a response
//! schema, so the model's answer is constrained to the `MedicalAnalysis` shape.
//!
//! # Behavior
//!
//! - One blocking HTTP request per call, no retries
//! - API key read once at construction; a missing key fails each call, not construction
//! - No explicit deadline unless `timeout_secs` is configured
//!
//! # Examples
//!
//! ```no_run
//! use medreport_llm::{GeminiConfig, GeminiProvider};
//!
//! let provider = GeminiProvider::new(GeminiConfig::default()).unwrap();
//! assert!(provider.model().starts_with("gemini"));
//! ```

use crate::LlmError;
use medreport_domain::{LlmProvider, StructuredRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Default Gemini API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Connection settings for the Gemini service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name (e.g., "gemini-2.5-pro")
    #[serde(default = "default_model")]
    pub model: String,

    /// Environment variable the API key is read from
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Optional request timeout (seconds); client default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: None,
        }
    }
}

impl GeminiConfig {
    /// Read the API key from the configured environment variable
    ///
    /// Empty values count as missing.
    pub fn api_key_from_env(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

/// Gemini provider for schema-constrained generation
pub struct GeminiProvider {
    config: GeminiConfig,
    api_key: Option<String>,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiProvider {
    /// Create a provider, reading the API key from `config.api_key_env`
    ///
    /// # Errors
    ///
    /// Returns `LlmError::Other` if the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let api_key = config.api_key_from_env();

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Set the API key explicitly
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Model in use
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Whether an API key is available
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl LlmProvider for GeminiProvider {
    type Error = LlmError;

    fn generate_structured(&self, request: &StructuredRequest) -> Result<String, Self::Error> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingApiKey(self.config.api_key_env.clone()))?;

        let body = build_request_body(request)?;

        debug!(
            "Sending generateContent request to model '{}' ({} prompt chars)",
            self.config.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response body: {}", e)))?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.config.model.clone()));
        }
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.error.message)
                .unwrap_or(text);
            warn!("Gemini returned HTTP {}", status.as_u16());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        extract_response_text(&text)
    }
}

/// Build the `generateContent` JSON body for a structured request
fn build_request_body(request: &StructuredRequest) -> Result<GenerateContentRequest, LlmError> {
    let response_schema: Value = serde_json::from_str(&request.response_schema)
        .map_err(|e| LlmError::Other(format!("Invalid response schema: {}", e)))?;

    Ok(GenerateContentRequest {
        contents: vec![Content {
            role: Some("user"),
            parts: vec![Part {
                text: request.prompt.clone(),
            }],
        }],
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: request.system_instruction.clone(),
            }],
        },
        generation_config: GenerationConfig {
            response_mime_type: "application/json",
            response_schema,
        },
    })
}

/// Pull the generated text out of a successful response body
fn extract_response_text(body: &str) -> Result<String, LlmError> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    let candidate = match response.candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_string());
            return Err(LlmError::InvalidResponse(format!("Empty response: {}", reason)));
        }
    };

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "UNKNOWN".to_string());
        return Err(LlmError::InvalidResponse(format!(
            "Candidate contained no text (finish reason: {})",
            reason
        )));
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> StructuredRequest {
        StructuredRequest {
            system_instruction: "Be cautious.".to_string(),
            prompt: "MEDICAL REPORT TEXT:\n---BP 160/100---".to_string(),
            response_schema: r#"{"type": "OBJECT"}"#.to_string(),
        }
    }

    fn config_for(endpoint: &str) -> GeminiConfig {
        GeminiConfig {
            endpoint: endpoint.to_string(),
            api_key_env: "MEDREPORT_TEST_UNSET_KEY".to_string(),
            ..GeminiConfig::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GeminiConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.timeout_secs, None);
    }

    #[test]
    fn test_config_from_partial_toml() {
        let config: GeminiConfig = toml::from_str(r#"model = "gemini-2.5-flash""#).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_url() {
        let provider = GeminiProvider::new(config_for("http://localhost:9999/v1beta/")).unwrap();
        assert_eq!(
            provider.url(),
            "http://localhost:9999/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(build_request_body(&request()).unwrap()).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "MEDICAL REPORT TEXT:\n---BP 160/100---"
        );
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be cautious.");
        assert!(body["systemInstruction"].get("role").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], json!({"type": "OBJECT"}));
    }

    #[test]
    fn test_request_body_rejects_invalid_schema() {
        let mut bad = request();
        bad.response_schema = "not json".to_string();
        assert!(matches!(build_request_body(&bad), Err(LlmError::Other(_))));
    }

    #[test]
    fn test_extract_response_text_joins_parts() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}], "role": "model"},
                "finishReason": "STOP"
            }]
        });
        let text = extract_response_text(&body.to_string()).unwrap();
        assert_eq!(text, "{\"a\": 1}");
    }

    #[test]
    fn test_extract_response_text_blocked_prompt() {
        let body = json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = extract_response_text(&body.to_string()).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(ref msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn test_extract_response_text_empty_candidate() {
        let body = json!({"candidates": [{"finishReason": "MAX_TOKENS"}]});
        let err = extract_response_text(&body.to_string()).unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(ref msg) if msg.contains("MAX_TOKENS")));
    }

    #[test]
    fn test_missing_api_key_fails_at_call_time() {
        let provider = GeminiProvider::new(config_for(DEFAULT_ENDPOINT)).unwrap();
        assert!(!provider.has_api_key());

        let result = provider.generate_structured(&request());
        assert!(matches!(result, Err(LlmError::MissingApiKey(ref var)) if var == "MEDREPORT_TEST_UNSET_KEY"));
    }

    #[test]
    fn test_communication_error() {
        // Nothing listens on port 1
        let provider = GeminiProvider::new(config_for("http://127.0.0.1:1/v1beta"))
            .unwrap()
            .with_api_key("test-key");

        let result = provider.generate_structured(&request());
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
