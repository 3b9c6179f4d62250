//! Script-aware font lookup for the export renderers. Noto fonts are
//! searched in the configured fonts directory first, then well-known system
//! locations for a Latin fallback.

use std::path::{Path, PathBuf};

use crate::language::SupportedLanguage;

/// Noto Sans file name covering the language's script, if it needs one
/// beyond Latin.
fn script_font_file(language: SupportedLanguage) -> Option<&'static str> {
    match language {
        SupportedLanguage::En => None,
        SupportedLanguage::Hi | SupportedLanguage::Mr => Some("NotoSansDevanagari-Regular.ttf"),
        SupportedLanguage::Gu => Some("NotoSansGujarati-Regular.ttf"),
        SupportedLanguage::Ta => Some("NotoSansTamil-Regular.ttf"),
        SupportedLanguage::Te => Some("NotoSansTelugu-Regular.ttf"),
        SupportedLanguage::Kn => Some("NotoSansKannada-Regular.ttf"),
        SupportedLanguage::Ml => Some("NotoSansMalayalam-Regular.ttf"),
        SupportedLanguage::Bn => Some("NotoSansBengali-Regular.ttf"),
        SupportedLanguage::Pa => Some("NotoSansGurmukhi-Regular.ttf"),
        SupportedLanguage::Or => Some("NotoSansOriya-Regular.ttf"),
        SupportedLanguage::Ur => Some("NotoNastaliqUrdu-Regular.ttf"),
    }
}

/// Latin fallbacks, checked when no script font is found.
const SYSTEM_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Load font bytes for the language: script font from the fonts dir, then a
/// generic Noto Sans there, then system fallbacks. `None` means the caller
/// has no font to rasterize with.
pub fn load_font_bytes(fonts_dir: &Path, language: SupportedLanguage) -> Option<Vec<u8>> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(file) = script_font_file(language) {
        candidates.push(fonts_dir.join(file));
    }
    candidates.push(fonts_dir.join("NotoSans-Regular.ttf"));
    candidates.extend(SYSTEM_FONT_PATHS.iter().map(PathBuf::from));

    for candidate in candidates {
        if let Ok(bytes) = std::fs::read(&candidate) {
            tracing::debug!(path = %candidate.display(), "loaded export font");
            return Some(bytes);
        }
    }
    tracing::warn!(language = %language, "no export font found");
    None
}
