//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use medreport_domain::{MedicalAnalysis, Severity};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Notice printed under every table-format analysis
pub const NOT_MEDICAL_ADVICE: &str =
    "This analysis is informational only and is not medical advice.";

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an analysis result.
    pub fn format_analysis(&self, analysis: &MedicalAnalysis) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&analysis.to_fields())?),
            OutputFormat::Table => Ok(self.format_analysis_table(analysis)),
        }
    }

    fn format_analysis_table(&self, analysis: &MedicalAnalysis) -> String {
        let severity = analysis.severity_analysis();

        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Severity", severity.as_str()]);
        builder.push_record([
            "Key findings",
            &bullet_list(analysis.key_abnormal_findings()),
        ]);
        builder.push_record([
            "Precautions / next steps",
            &bullet_list(analysis.precautions_and_next_steps()),
        ]);
        builder.push_record(["Medication", analysis.medication_suggestion()]);
        builder.push_record(["Physician", analysis.physician_recommendation()]);
        builder.push_record(["See a", analysis.recommended_doctor_type().as_str()]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut headline = self.colorize(
            &format!("Severity: {}", severity),
            severity_color(severity),
        );
        if severity.requires_prompt_visit() {
            headline.push('\n');
            headline.push_str(&self.warning(&format!(
                "Please see a {} soon",
                analysis.recommended_doctor_type()
            )));
        }

        format!(
            "{}\n{}\n{}",
            headline,
            table,
            self.warning(NOT_MEDICAL_ADVICE)
        )
    }

    /// Format text extracted from a file.
    pub fn format_extracted_text(&self, file: &str, text: &str) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "file": file,
                "characters": text.chars().count(),
                "text": text,
            }))?),
            OutputFormat::Table => Ok(format!(
                "{}\n{}",
                self.info(&format!(
                    "Extracted {} characters from {}",
                    text.chars().count(),
                    file
                )),
                text
            )),
        }
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "bright red" => text.bright_red().bold().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn severity_color(severity: Severity) -> &'static str {
    match severity.urgency_rank() {
        0 => "green",
        1 => "yellow",
        2 => "red",
        _ => "bright red",
    }
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(none)".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}
