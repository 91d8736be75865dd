//! Medreport Extractor
//!
//! Best-effort plain text from uploaded PDF reports.
//!
//! # Soft failure
//!
//! The extractor never fails loudly. Unparseable input, image-only (scanned)
//! PDFs and internal parser panics all come back as an empty string; the
//! reason is logged for operators and goes no further. Callers treat empty
//! text as "nothing to analyze".
//!
//! ```
//! use medreport_extractor::{allowed_file, PdfTextExtractor};
//!
//! assert!(allowed_file("lab_results.PDF"));
//! assert_eq!(PdfTextExtractor::new().extract_text(b"not a pdf"), "");
//! ```

#![warn(missing_docs)]

mod error;
mod pdf;
mod upload;

pub use error::ExtractError;
pub use pdf::PdfTextExtractor;
pub use upload::{allowed_file, ALLOWED_EXTENSIONS, FILE_TYPE_NOT_ALLOWED, NO_TEXT_MESSAGE};
