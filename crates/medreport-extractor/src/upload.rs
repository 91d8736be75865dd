//! Upload file-type gate

/// Extensions accepted for upload (lowercase, without the dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

/// Message for uploads rejected by [`allowed_file`]
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed. Please upload a PDF.";

/// Message for PDFs that yield no text
pub const NO_TEXT_MESSAGE: &str =
    "Failed to extract readable text from the PDF. It might be a scanned image or empty.";

/// Check an uploaded filename against the extension allow-list
///
/// The name must contain a dot; the text after the last dot is compared
/// case-insensitively.
pub fn allowed_file(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, extension)) => {
            let extension = extension.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&extension.as_str())
        }
        None => false,
    }
}
