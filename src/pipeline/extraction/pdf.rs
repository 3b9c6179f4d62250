//! PDF text-layer extraction. Scanned PDFs without a text layer are not
//! rendered and OCRed; the caller reports them as unreadable.

use super::ExtractionError;

pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;
    Ok(pages.join("\n"))
}
