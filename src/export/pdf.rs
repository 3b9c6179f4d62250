//! PDF export via printpdf. A4, paginated, with a diagonal watermark on
//! every page.

use std::path::Path;

use printpdf::*;

use super::fonts::load_font_bytes;
use super::wrap::{wrap_paragraphs, wrap_words};
use super::{ExportError, DISCLAIMER, FOOTER, WATERMARK};
use crate::models::SimplifyResponse;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const TOP_Y: f32 = PAGE_HEIGHT - MARGIN;
const BOTTOM_Y: f32 = MARGIN;
const BODY_WRAP: usize = 90;

fn pdf_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(e.to_string())
}

/// Render a simplified document to PDF bytes: title, language line, body,
/// numbered glossary, disclaimer and footer.
pub fn render_pdf(result: &SimplifyResponse, fonts_dir: &Path) -> Result<Vec<u8>, ExportError> {
    let (doc, page1, layer1) =
        PdfDocument::new("SaralDocs - Simplified Document", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");

    let helvetica = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_err)?;
    let helvetica_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold).map_err(pdf_err)?;

    // Builtin fonts cannot encode Indic scripts; try a script font from the
    // fonts directory and fall back to Helvetica if it is missing.
    let script_font = if result.target_language.is_latin_script() {
        None
    } else {
        load_font_bytes(fonts_dir, result.target_language)
            .and_then(|bytes| doc.add_external_font(std::io::Cursor::new(bytes)).ok())
    };
    let body_font = script_font.clone().unwrap_or_else(|| helvetica.clone());
    let term_font = script_font.unwrap_or_else(|| helvetica_bold.clone());

    let mut writer = PageWriter {
        doc: &doc,
        layer: doc.get_page(page1).get_layer(layer1),
        y: Mm(TOP_Y),
        watermark_font: helvetica_bold.clone(),
    };
    writer.stamp_watermark();

    // Header
    writer.text("SaralDocs - Simplified Document", 16.0, MARGIN, &helvetica_bold);
    writer.advance(8.0);
    writer.set_gray(0.4);
    writer.text(
        &format!("Output Language: {}", result.target_language.display_name()),
        9.0,
        MARGIN,
        &helvetica,
    );
    writer.set_gray(0.0);
    writer.advance(10.0);

    // Body
    writer.text("Simplified Version", 13.0, MARGIN, &helvetica_bold);
    writer.advance(7.0);
    for line in wrap_paragraphs(&result.simplified_text, BODY_WRAP) {
        if line.is_empty() {
            writer.advance(4.5);
        } else {
            writer.text(&line, 10.0, MARGIN, &body_font);
            writer.advance(4.5);
        }
    }

    // Glossary
    if !result.glossary.is_empty() {
        writer.advance(8.0);
        writer.text("Glossary / Important Terms", 13.0, MARGIN, &helvetica_bold);
        writer.advance(7.0);
        for (index, entry) in result.glossary.iter().enumerate() {
            writer.set_color(0.0, 0.4, 0.8);
            writer.text(&format!("{}. {}", index + 1, entry.term), 10.0, MARGIN, &term_font);
            writer.set_gray(0.2);
            writer.advance(5.0);
            for line in wrap_words(&entry.definition, BODY_WRAP - 4) {
                writer.text(&line, 9.0, MARGIN + 6.0, &body_font);
                writer.advance(4.0);
            }
            writer.set_gray(0.0);
            writer.advance(2.0);
        }
    }

    // Disclaimer and footer
    writer.advance(8.0);
    writer.set_gray(0.5);
    for line in wrap_words(DISCLAIMER, 110) {
        writer.text(&line, 7.0, MARGIN, &helvetica);
        writer.advance(3.5);
    }
    writer.advance(3.0);
    writer.set_gray(0.7);
    writer.text(FOOTER, 7.0, MARGIN, &helvetica);
    writer.set_gray(0.0);

    let mut buf = std::io::BufWriter::new(Vec::new());
    doc.save(&mut buf).map_err(pdf_err)?;
    buf.into_inner().map_err(pdf_err)
}

/// Tracks the cursor on the current page and starts a new watermarked page
/// when the cursor runs off the bottom.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: Mm,
    watermark_font: IndirectFontRef,
}

impl PageWriter<'_> {
    fn text(&mut self, text: &str, size: f32, x: f32, font: &IndirectFontRef) {
        self.break_page_if_needed();
        self.layer.use_text(text, size, Mm(x), self.y, font);
    }

    fn advance(&mut self, mm: f32) {
        self.y -= Mm(mm);
    }

    fn break_page_if_needed(&mut self) {
        if self.y < Mm(BOTTOM_Y) {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = Mm(TOP_Y);
            self.stamp_watermark();
        }
    }

    fn set_gray(&self, level: f32) {
        self.set_color(level, level, level);
    }

    fn set_color(&self, r: f32, g: f32, b: f32) {
        self.layer.set_fill_color(Color::Rgb(Rgb::new(r, g, b, None)));
    }

    fn stamp_watermark(&self) {
        self.set_gray(0.88);
        for &y in &[70.0, 160.0, 250.0] {
            self.layer.begin_text_section();
            self.layer.set_font(&self.watermark_font, 26.0);
            self.layer
                .set_text_matrix(TextMatrix::TranslateRotate(
                    Mm(35.0).into_pt(),
                    Mm(y).into_pt(),
                    -30.0,
                ));
            self.layer.write_text(WATERMARK, &self.watermark_font);
            self.layer.end_text_section();
        }
        self.set_gray(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::SupportedLanguage;
    use crate::models::GlossaryTerm;

    fn sample() -> SimplifyResponse {
        SimplifyResponse {
            original_text: "original".into(),
            simplified_text:
                "The government will pay the subsidy by March.\n\nYou must apply at the district office."
                    .into(),
            glossary: vec![
                GlossaryTerm { term: "subsidy".into(), definition: "money from the government".into() },
                GlossaryTerm { term: "March 31".into(), definition: "the payment deadline".into() },
            ],
            target_language: SupportedLanguage::En,
        }
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_pdf(&sample(), Path::new("fonts")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 1_000);
    }

    #[test]
    fn long_documents_paginate_without_error() {
        let mut result = sample();
        result.simplified_text = "A fairly long explanatory sentence about the rules.\n".repeat(300);
        let bytes = render_pdf(&result, Path::new("fonts")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn missing_script_font_falls_back_to_builtin() {
        let mut result = sample();
        result.target_language = SupportedLanguage::Hi;
        // No fonts directory at this path; the renderer must still produce
        // a document.
        let bytes = render_pdf(&result, Path::new("/nonexistent/fonts")).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn output_contains_body_text_and_every_glossary_term() {
        let result = sample();
        let bytes = render_pdf(&result, Path::new("fonts")).unwrap();
        let text = pdf_extract::extract_text_from_mem(&bytes).unwrap();
        assert!(text.contains("The government will pay the subsidy by March."));
        assert!(text.contains("You must apply at the district office."));
        for entry in &result.glossary {
            assert!(text.contains(&entry.term), "missing glossary term: {}", entry.term);
            assert!(text.contains(&entry.definition), "missing definition: {}", entry.definition);
        }
        assert!(text.contains(WATERMARK));
    }

    #[test]
    fn empty_glossary_is_fine() {
        let mut result = sample();
        result.glossary.clear();
        assert!(render_pdf(&result, Path::new("fonts")).is_ok());
    }
}
