//! Chat command implementation.

use crate::cli::ChatArgs;
use crate::error::Result;
use crate::output::Formatter;
use medreport_analyzer::Analyzer;
use medreport_domain::LlmProvider;
use std::fmt::Display;

/// Execute the chat command.
pub fn execute_chat<L>(args: ChatArgs, analyzer: &Analyzer<L>, formatter: &Formatter) -> Result<String>
where
    L: LlmProvider,
    L::Error: Display,
{
    let analysis = analyzer.analyze(&args.text())?;
    formatter.format_analysis(&analysis)
}
