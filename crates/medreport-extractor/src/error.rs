//! Error types for the Extractor

use thiserror::Error;

/// Reasons extraction produced no text
///
/// Only surfaced by the `try_*` methods; the soft API logs these and
/// returns an empty string instead.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Reading the input stream failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be parsed
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    /// The PDF library panicked on this input
    #[error("PDF parser panicked: {0}")]
    Panicked(String),
}
