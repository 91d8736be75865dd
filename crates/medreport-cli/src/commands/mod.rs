//! Command implementations.
//!
//! Each command returns its rendered output; `main` prints it.

pub mod analyze;
pub mod chat;
pub mod extract;

pub use self::analyze::execute_analyze;
pub use self::chat::execute_chat;
pub use self::extract::{execute_extract, read_report_text};

use crate::config::Config;
use crate::error::Result;
use medreport_analyzer::Analyzer;
use medreport_llm::GeminiProvider;
use tracing::warn;

/// Build the Gemini-backed analyzer used by `analyze` and `chat`
pub fn build_analyzer(config: &Config) -> Result<Analyzer<GeminiProvider>> {
    let provider = GeminiProvider::new(config.llm.clone())?;
    if !provider.has_api_key() {
        warn!(
            "API key not found in ${}; analysis will fail",
            config.llm.api_key_env
        );
    }
    Ok(Analyzer::new(provider, config.analyzer.clone()).with_model_name(&config.llm.model))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_analyzer_uses_configured_model() {
        let mut config = Config::default();
        config.set_model("gemini-2.5-flash".to_string()).unwrap();
        config.llm.api_key_env = "MEDREPORT_TEST_UNSET_KEY".to_string();
        config.analyzer.max_text_length = Some(500);

        let analyzer = build_analyzer(&config).unwrap();
        assert_eq!(analyzer.model_name(), "gemini-2.5-flash");
        assert_eq!(analyzer.provider().model(), "gemini-2.5-flash");
        assert!(!analyzer.provider().has_api_key());
    }
}
