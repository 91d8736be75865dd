//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Medreport - Structured analysis of medical lab and imaging reports.
///
/// Results are informational only and are not medical advice.
#[derive(Debug, Parser)]
#[command(name = "medreport")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Model to use (overrides the config file)
    #[arg(short, long, global = true, env = "MEDREPORT_MODEL")]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the text extracted from a PDF report
    Extract(ExtractArgs),

    /// Extract and analyze a PDF report
    Analyze(AnalyzeArgs),

    /// Analyze free text pasted on the command line
    Chat(ChatArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// PDF file to read
    pub file: PathBuf,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// PDF file to analyze
    pub file: PathBuf,
}

/// Arguments for the chat command.
#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// Report text or question (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,
}

impl ChatArgs {
    /// The message as a single string
    pub fn text(&self) -> String {
        self.message.join(" ")
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_command() {
        let cli = Cli::parse_from(["medreport", "analyze", "report.pdf"]);
        match cli.command {
            Command::Analyze(args) => assert_eq!(args.file, PathBuf::from("report.pdf")),
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_chat_joins_words() {
        let cli = Cli::parse_from(["medreport", "chat", "BP", "160/100", "today"]);
        match cli.command {
            Command::Chat(args) => assert_eq!(args.text(), "BP 160/100 today"),
            _ => panic!("Expected Chat command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "medreport",
            "extract",
            "report.pdf",
            "--format",
            "json",
            "--no-color",
            "--model",
            "gemini-2.5-flash",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(cli.no_color);
        assert_eq!(cli.model.as_deref(), Some("gemini-2.5-flash"));
    }

    #[test]
    fn test_chat_requires_message() {
        assert!(Cli::try_parse_from(["medreport", "chat"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Json.into();
        assert!(matches!(format, crate::config::OutputFormat::Json));
    }
}
