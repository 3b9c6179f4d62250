//! Rendering of simplified documents to downloadable artifacts. Correctness
//! bar: every line of simplified text and every glossary entry must appear,
//! word-wrapped; visual polish is not a goal.

mod fonts;
mod image;
mod pdf;
mod wrap;

pub use fonts::load_font_bytes;
pub use image::render_png;
pub use pdf::render_pdf;
pub use wrap::{wrap_paragraphs, wrap_words};

/// Watermark stamped diagonally on every export.
pub const WATERMARK: &str = "SIMPLIFIED VERSION";

/// Disclaimer appended to every export.
pub const DISCLAIMER: &str =
    "DISCLAIMER: This simplified version is for understanding purposes only and is NOT a legal replacement. Always use the original document for official purposes. Consult a lawyer for legal matters.";

/// Footer line on the PDF export.
pub const FOOTER: &str = "Simplified Version - Not Legally Verified | Generated by SaralDocs";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no usable font found for rendering: {0}")]
    FontUnavailable(String),
    #[error("PDF generation failed: {0}")]
    Pdf(String),
    #[error("image generation failed: {0}")]
    Image(String),
}
