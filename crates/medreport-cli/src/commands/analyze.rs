//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::commands::read_report_text;
use crate::error::Result;
use crate::output::Formatter;
use medreport_analyzer::Analyzer;
use medreport_domain::LlmProvider;
use medreport_extractor::PdfTextExtractor;
use std::fmt::Display;

/// Execute the analyze command.
pub fn execute_analyze<L>(
    args: AnalyzeArgs,
    extractor: &PdfTextExtractor,
    analyzer: &Analyzer<L>,
    formatter: &Formatter,
) -> Result<String>
where
    L: LlmProvider,
    L::Error: Display,
{
    let text = read_report_text(&args.file, extractor)?;
    let analysis = analyzer.analyze(&text)?;
    formatter.format_analysis(&analysis)
}
