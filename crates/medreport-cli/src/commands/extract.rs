//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use medreport_extractor::{allowed_file, PdfTextExtractor, FILE_TYPE_NOT_ALLOWED, NO_TEXT_MESSAGE};
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the extract command.
pub fn execute_extract(
    args: ExtractArgs,
    extractor: &PdfTextExtractor,
    formatter: &Formatter,
) -> Result<String> {
    let text = read_report_text(&args.file, extractor)?;
    formatter.format_extracted_text(&args.file.display().to_string(), &text)
}

/// Read a PDF report from disk and return its text
///
/// Applies the same gate as uploads: a `.pdf` name is required, and a
/// document without extractable text is an error.
pub fn read_report_text(path: &Path, extractor: &PdfTextExtractor) -> Result<String> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");
    if !allowed_file(filename) {
        return Err(CliError::InvalidInput(FILE_TYPE_NOT_ALLOWED.to_string()));
    }

    let bytes = fs::read(path)?;
    info!("Read {} ({} bytes)", path.display(), bytes.len());

    let text = extractor.extract_text(&bytes);
    if text.is_empty() {
        return Err(CliError::Extraction(NO_TEXT_MESSAGE.to_string()));
    }
    Ok(text)
}
