//! PDF text extraction using the pdf-extract crate

use crate::error::ExtractError;
use std::any::Any;
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

/// PDF text extractor for digital PDFs with embedded text layers
///
/// Scanned, image-only documents have no text layer and produce an empty
/// string; no OCR is attempted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract text from PDF bytes, returning an empty string on any failure
    ///
    /// Page texts are joined with a newline and the result is trimmed.
    pub fn extract_text(&self, pdf_bytes: &[u8]) -> String {
        match self.try_extract_pages(pdf_bytes) {
            Ok(pages) => {
                let text = pages.join("\n").trim().to_string();
                if text.is_empty() {
                    debug!("PDF parsed ({} pages) but contained no text", pages.len());
                }
                text
            }
            Err(e) => {
                warn!("PDF extraction failed: {}", e);
                String::new()
            }
        }
    }

    /// Extract text from a readable stream, returning an empty string on any failure
    pub fn extract_from_reader<R: Read>(&self, mut reader: R) -> String {
        let mut buffer = Vec::new();
        if let Err(e) = reader.read_to_end(&mut buffer) {
            warn!("PDF extraction failed: {}", ExtractError::Io(e));
            return String::new();
        }
        self.extract_text(&buffer)
    }

    /// Extract the text of each page
    ///
    /// # Errors
    ///
    /// Returns `PdfParsing` when the document cannot be read and `Panicked`
    /// when the underlying parser panics on malformed input.
    pub fn try_extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        }));

        match outcome {
            Ok(Ok(pages)) => Ok(pages),
            Ok(Err(e)) => Err(ExtractError::PdfParsing(e.to_string())),
            Err(payload) => Err(ExtractError::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Number of pages the parser sees
    pub fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize, ExtractError> {
        Ok(self.try_extract_pages(pdf_bytes)?.len())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use lopdf::{Document, Object, Stream};
    use std::io::Cursor;

    /// Build a PDF with one page per entry; `None` pages have an empty content stream.
    fn make_test_pdf(pages: &[Option<&str>]) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for page in pages {
            let content = match page {
                Some(text) => format!("BT /F1 12 Tf 72 700 Td ({}) Tj ET", text),
                None => String::new(),
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extracts_page_text() {
        let pdf = make_test_pdf(&[Some("Patient BP 160/100 recorded")]);
        let text = PdfTextExtractor::new().extract_text(&pdf);
        assert!(text.contains("BP 160/100"), "got: {text:?}");
    }

    #[test]
    fn test_joins_multiple_pages() {
        let pdf = make_test_pdf(&[Some("Glucose 180 mg/dL"), None, Some("BP 160/100")]);
        let extractor = PdfTextExtractor::new();

        assert_eq!(extractor.page_count(&pdf).unwrap(), 3);

        let text = extractor.extract_text(&pdf);
        assert!(text.contains("Glucose"));
        assert!(text.contains("BP 160/100"));
        assert!(text.find("Glucose") < text.find("BP 160/100"));
    }

    #[test]
    fn test_result_is_trimmed() {
        let pdf = make_test_pdf(&[Some("HbA1c 7.2%")]);
        let text = PdfTextExtractor::new().extract_text(&pdf);
        assert_eq!(text, text.trim());
        assert!(!text.is_empty());
    }

    #[test]
    fn test_no_extractable_text_yields_empty_string() {
        let pdf = make_test_pdf(&[None, None]);
        assert_eq!(PdfTextExtractor::new().extract_text(&pdf), "");
    }

    #[test]
    fn test_invalid_pdf_yields_empty_string() {
        let extractor = PdfTextExtractor::new();
        assert_eq!(extractor.extract_text(b"not a pdf"), "");
        assert_eq!(extractor.extract_text(&[]), "");
    }

    #[test]
    fn test_invalid_pdf_hard_error() {
        let result = PdfTextExtractor::new().try_extract_pages(b"%PDF-1.4 garbage");
        assert!(result.is_err());
    }

    #[test]
    fn test_extract_from_reader() {
        let pdf = make_test_pdf(&[Some("BP 160/100")]);
        let text = PdfTextExtractor::new().extract_from_reader(Cursor::new(pdf));
        assert!(text.contains("BP 160/100"));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_unreadable_stream_yields_empty_string() {
        assert_eq!(PdfTextExtractor::new().extract_from_reader(FailingReader), "");
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("bad font");
        assert_eq!(panic_message(payload.as_ref()), "bad font");

        let payload: Box<dyn Any + Send> = Box::new(String::from("bad xref"));
        assert_eq!(panic_message(payload.as_ref()), "bad xref");

        let payload: Box<dyn Any + Send> = Box::new(42);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
