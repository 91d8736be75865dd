//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::parser::{parse_analysis_response, parse_raw_response};
use crate::prompt::PromptBuilder;
use crate::schema::response_schema;
use medreport_domain::{LlmProvider, MedicalAnalysis, StructuredRequest};
use std::fmt::Display;
use std::time::Instant;
use tracing::{debug, info, warn};

/// The Analyzer turns report text into a validated `MedicalAnalysis`
///
/// The provider and configuration are fixed at construction and only read
/// afterwards, so one Analyzer can serve concurrent requests.
pub struct Analyzer<L>
where
    L: LlmProvider,
{
    llm_provider: L,
    config: AnalyzerConfig,
    response_schema: String,
    model_name: String,
}

impl<L> Analyzer<L>
where
    L: LlmProvider,
    L::Error: Display,
{
    /// Create a new Analyzer
    pub fn new(llm_provider: L, config: AnalyzerConfig) -> Self {
        Self {
            llm_provider,
            config,
            response_schema: response_schema().to_string(),
            model_name: "llm".to_string(),
        }
    }

    /// Label the model in logs
    pub fn with_model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = model_name.into();
        self
    }

    /// Model label used in logs
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Analyze report text
    ///
    /// Makes at most one provider call. Empty text is rejected without
    /// contacting the provider.
    ///
    /// # Errors
    ///
    /// - `AnalysisError::EmptyInput` for empty or whitespace-only text
    /// - `AnalysisError::Failed` for provider errors, responses that do not
    ///   match the schema, and text over a configured `max_text_length`
    pub fn analyze(&self, report_text: &str) -> Result<MedicalAnalysis, AnalysisError> {
        if report_text.trim().is_empty() {
            info!("Rejected analysis request: empty input");
            return Err(AnalysisError::EmptyInput);
        }

        let text_length = report_text.chars().count();
        if let Some(max_text_length) = self.config.max_text_length {
            if text_length > max_text_length {
                warn!(
                    "Rejected analysis request: {} chars exceeds limit of {}",
                    text_length, max_text_length
                );
                return Err(AnalysisError::Failed(format!(
                    "Report text too long: {} chars (max: {})",
                    text_length, max_text_length
                )));
            }
        }

        let prompt_builder = PromptBuilder::new(report_text);
        let request = StructuredRequest {
            system_instruction: prompt_builder.system_instruction(),
            prompt: prompt_builder.build(),
            response_schema: self.response_schema.clone(),
        };

        debug!("Prompt length: {} chars", request.prompt.len());
        info!(
            "Sending report ({} chars) to model '{}'",
            text_length, self.model_name
        );

        let start_time = Instant::now();
        let response = self
            .llm_provider
            .generate_structured(&request)
            .map_err(|e| {
                warn!("Analysis failed: provider error: {}", e);
                AnalysisError::Failed(e.to_string())
            })?;

        debug!(
            "LLM response length: {} chars after {} ms",
            response.len(),
            start_time.elapsed().as_millis()
        );

        let parsed = if self.config.strip_code_fences {
            parse_analysis_response(&response)
        } else {
            parse_raw_response(&response)
        };

        let analysis = parsed.map_err(|e| {
            warn!("Analysis failed: schema validation: {}", e);
            AnalysisError::Failed(e.to_string())
        })?;

        if !analysis.has_medication_disclaimer() {
            warn!("Validated analysis is missing the medication disclaimer");
        }

        info!(
            "Analysis validated: severity '{}', {} findings, recommend {}",
            analysis.severity_analysis(),
            analysis.key_abnormal_findings().len(),
            analysis.recommended_doctor_type()
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medreport_llm::MockProvider;

    fn create_test_analyzer(response: &str) -> Analyzer<MockProvider> {
        Analyzer::new(MockProvider::new(response), AnalyzerConfig::default())
    }

    #[test]
    fn test_whitespace_only_is_empty_input() {
        let analyzer = create_test_analyzer("{}");
        assert_eq!(analyzer.analyze("  \n\t "), Err(AnalysisError::EmptyInput));
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[test]
    fn test_text_too_long_skips_provider() {
        let config = AnalyzerConfig {
            max_text_length: Some(10),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(MockProvider::new("{}"), config);

        let result = analyzer.analyze(&"a".repeat(11));
        assert!(matches!(result, Err(AnalysisError::Failed(ref msg)) if msg.contains("too long")));
        assert_eq!(analyzer.provider().call_count(), 0);
    }

    #[test]
    fn test_long_text_reaches_provider_by_default() {
        let analyzer = create_test_analyzer("not json");
        let report = "BP 160/100 ".repeat(20_000);

        let result = analyzer.analyze(&report);
        assert!(matches!(result, Err(AnalysisError::Failed(ref msg)) if !msg.contains("too long")));
        assert_eq!(analyzer.provider().call_count(), 1);
    }

    #[test]
    fn test_request_carries_schema_and_instruction() {
        let analyzer = create_test_analyzer("not json");
        let _ = analyzer.analyze("BP 160/100");

        let request = analyzer.provider().last_request().unwrap();
        assert!(request.prompt.contains("---BP 160/100---"));
        assert!(request.system_instruction.contains("CAUTIOUS"));

        let schema: serde_json::Value = serde_json::from_str(&request.response_schema).unwrap();
        assert_eq!(schema, response_schema());
    }

    #[test]
    fn test_model_name() {
        let analyzer = create_test_analyzer("{}").with_model_name("gemini-2.5-pro");
        assert_eq!(analyzer.model_name(), "gemini-2.5-pro");
    }
}
