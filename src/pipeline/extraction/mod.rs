//! Text extraction from uploads: Tesseract OCR for images, text-layer
//! extraction for PDFs. Anything shorter than ten characters counts as
//! unreadable.

mod ocr;
mod pdf;

use std::path::Path;

pub use ocr::{build_engine, OcrEngine, UnavailableOcr};
#[cfg(feature = "ocr")]
pub use ocr::TesseractOcr;
pub use pdf::extract_pdf_text;

use crate::config::MIN_EXTRACTED_CHARS;
use crate::language::SupportedLanguage;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Failed to read uploaded file: {0}")]
    Io(#[from] std::io::Error),
    #[error("OCR engine initialization failed: {0}")]
    OcrInit(String),
    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),
    #[error("OCR engine not compiled in. Rebuild with the 'ocr' feature to process images.")]
    OcrUnavailable,
    #[error("Tesseract language data not found at {0}")]
    TessdataNotFound(std::path::PathBuf),
    #[error("Failed to parse PDF: {0}")]
    PdfParsing(String),
    #[error("This PDF has no readable text layer. It may be a scanned document — please upload it as an image instead.")]
    NoTextLayer,
    #[error("No readable text found in the image. Please upload a clearer photo of the document.")]
    NoReadableText,
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
}

/// Extract the document text from a temp file, dispatching on MIME type.
/// The returned text is trimmed and guaranteed non-trivial (>= 10 chars).
pub fn extract_document(
    path: &Path,
    mime: &str,
    language: SupportedLanguage,
    ocr: &dyn OcrEngine,
) -> Result<String, ExtractionError> {
    if mime == "application/pdf" {
        let bytes = std::fs::read(path)?;
        let text = extract_pdf_text(&bytes)?;
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_EXTRACTED_CHARS {
            return Err(ExtractionError::NoTextLayer);
        }
        tracing::info!(chars = trimmed.len(), "extracted text layer from PDF");
        return Ok(trimmed.to_string());
    }

    if mime.starts_with("image/") {
        let text = ocr.recognize(path, language.tesseract_profile())?;
        let trimmed = text.trim();
        if trimmed.chars().count() < MIN_EXTRACTED_CHARS {
            return Err(ExtractionError::NoReadableText);
        }
        tracing::info!(
            chars = trimmed.len(),
            profile = language.tesseract_profile(),
            "OCR extraction complete"
        );
        return Ok(trimmed.to_string());
    }

    Err(ExtractionError::UnsupportedType(mime.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    struct FixedOcr {
        text: String,
        calls: Mutex<usize>,
    }

    impl FixedOcr {
        fn returning(text: &str) -> Self {
            Self { text: text.to_string(), calls: Mutex::new(0) }
        }
    }

    impl OcrEngine for FixedOcr {
        fn recognize(&self, _path: &Path, _lang: &str) -> Result<String, ExtractionError> {
            *self.calls.lock().unwrap() += 1;
            Ok(self.text.clone())
        }
    }

    fn temp_file_with(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn image_goes_through_ocr() {
        let ocr = FixedOcr::returning("  This ration card belongs to the holder.  ");
        let file = temp_file_with(b"fake image bytes");
        let text =
            extract_document(file.path(), "image/jpeg", SupportedLanguage::En, &ocr).unwrap();
        assert_eq!(text, "This ration card belongs to the holder.");
        assert_eq!(*ocr.calls.lock().unwrap(), 1);
    }

    #[test]
    fn short_ocr_output_is_unreadable() {
        let ocr = FixedOcr::returning("   a b   ");
        let file = temp_file_with(b"fake image bytes");
        let err = extract_document(file.path(), "image/png", SupportedLanguage::Hi, &ocr)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NoReadableText));
    }

    #[test]
    fn unknown_mime_is_rejected() {
        let ocr = FixedOcr::returning("irrelevant");
        let file = temp_file_with(b"data");
        let err = extract_document(file.path(), "text/plain", SupportedLanguage::En, &ocr)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(_)));
        assert_eq!(*ocr.calls.lock().unwrap(), 0);
    }

    #[test]
    fn garbage_pdf_is_a_parse_error() {
        let ocr = FixedOcr::returning("irrelevant");
        let file = temp_file_with(b"not a pdf at all");
        let err = extract_document(file.path(), "application/pdf", SupportedLanguage::En, &ocr)
            .unwrap_err();
        assert!(matches!(err, ExtractionError::PdfParsing(_)));
    }
}
