//! Configuration for the Analyzer

use serde::{Deserialize, Serialize};

/// Configuration for the Analyzer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Maximum report length (characters) sent to the model; unlimited when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_text_length: Option<usize>,

    /// Accept responses wrapped in a markdown code fence
    pub strip_code_fences: bool,
}

impl AnalyzerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == Some(0) {
            return Err("max_text_length must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Strict preset: smaller reports, raw JSON responses only
    pub fn strict() -> Self {
        Self {
            max_text_length: Some(50_000),
            strip_code_fences: false,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_text_length: None,
            strip_code_fences: true,
        }
    }
}
