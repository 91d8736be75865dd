//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use medreport_analyzer::AnalyzerConfig;
use medreport_llm::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// LLM connection settings (`model`, `endpoint`, `api_key_env`, `timeout_secs`)
    #[serde(flatten)]
    pub llm: GeminiConfig,

    /// Analyzer options
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".medreport").join("config.toml"))
    }

    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents)?;
        config.analyzer.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Override the model name.
    pub fn set_model(&mut self, model: String) -> Result<()> {
        if model.trim().is_empty() {
            return Err(CliError::InvalidInput("Model name must not be empty".into()));
        }
        self.llm.model = model;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: GeminiConfig::default(),
            analyzer: AnalyzerConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.llm.model, "gemini-2.5-pro");
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
model = "gemini-2.5-flash"
api_key_env = "MY_KEY"

[settings]
color = false
format = "json"
"#
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert_eq!(config.llm.api_key_env, "MY_KEY");
        assert_eq!(config.llm.endpoint, GeminiConfig::default().endpoint);
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Json);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.llm, GeminiConfig::default());
        assert!(config.settings.color);
    }

    #[test]
    fn test_invalid_analyzer_settings_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analyzer]\nmax_text_length = 0").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_sample_config_is_valid() {
        let config: Config = toml::from_str(include_str!("../../../config/cli.toml")).unwrap();
        assert_eq!(config.llm, GeminiConfig::default());
        assert_eq!(config.analyzer, AnalyzerConfig::default());
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::load_from(Path::new("/nonexistent/medreport/config.toml"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_set_model() {
        let mut config = Config::default();
        config.set_model("gemini-2.5-flash".to_string()).unwrap();
        assert_eq!(config.llm.model, "gemini-2.5-flash");
        assert!(config.set_model("  ".to_string()).is_err());
    }
}
