//! OCR engine seam. The real engine wraps Tesseract and only exists when
//! compiled with the `ocr` feature; otherwise a stub reports the engine as
//! unavailable so the rest of the service still runs.

use std::path::Path;
use std::sync::Arc;

use super::ExtractionError;

pub trait OcrEngine: Send + Sync {
    /// Run OCR over the file at `path` with the given Tesseract language
    /// profile (e.g. "hin"). Returns raw recognized text, untrimmed.
    fn recognize(&self, path: &Path, lang: &str) -> Result<String, ExtractionError>;
}

/// Stand-in engine when the `ocr` feature is off.
pub struct UnavailableOcr;

impl OcrEngine for UnavailableOcr {
    fn recognize(&self, _path: &Path, _lang: &str) -> Result<String, ExtractionError> {
        Err(ExtractionError::OcrUnavailable)
    }
}

#[cfg(feature = "ocr")]
pub struct TesseractOcr {
    tessdata_dir: std::path::PathBuf,
}

#[cfg(feature = "ocr")]
impl TesseractOcr {
    /// Initialize with a tessdata directory. English traineddata must be
    /// present; per-language profiles are checked at recognition time so a
    /// missing script fails only the requests that need it.
    pub fn new(tessdata_dir: &Path) -> Result<Self, ExtractionError> {
        if !tessdata_dir.join("eng.traineddata").exists() {
            return Err(ExtractionError::TessdataNotFound(tessdata_dir.to_path_buf()));
        }
        Ok(Self { tessdata_dir: tessdata_dir.to_path_buf() })
    }

    /// Locate tessdata from TESSDATA_PREFIX or well-known system paths.
    pub fn discover() -> Result<Self, ExtractionError> {
        if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
            let dir = std::path::PathBuf::from(prefix);
            if dir.join("eng.traineddata").exists() {
                return Self::new(&dir);
            }
        }

        let candidates = [
            "/usr/share/tesseract-ocr/5/tessdata",
            "/usr/share/tesseract-ocr/4.00/tessdata",
            "/usr/share/tessdata",
            "/usr/local/share/tessdata",
            "/opt/homebrew/share/tessdata",
        ];
        for candidate in candidates {
            let dir = std::path::PathBuf::from(candidate);
            if dir.join("eng.traineddata").exists() {
                return Self::new(&dir);
            }
        }

        Err(ExtractionError::TessdataNotFound("tessdata".into()))
    }
}

#[cfg(feature = "ocr")]
impl OcrEngine for TesseractOcr {
    fn recognize(&self, path: &Path, lang: &str) -> Result<String, ExtractionError> {
        // Fall back to English when the requested script is not installed.
        let lang = if self.tessdata_dir.join(format!("{lang}.traineddata")).exists() {
            lang
        } else {
            tracing::warn!(profile = lang, "traineddata missing, falling back to eng");
            "eng"
        };

        let tessdata_str = self
            .tessdata_dir
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid tessdata path".into()))?;
        let image_path = path
            .to_str()
            .ok_or_else(|| ExtractionError::OcrInit("Invalid image path".into()))?;

        let tess = tesseract::Tesseract::new(Some(tessdata_str), Some(lang))
            .map_err(|e| ExtractionError::OcrInit(format!("{e:?}")))?;

        let mut tess = tess
            .set_image(image_path)
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))?;

        tess.get_text()
            .map_err(|e| ExtractionError::OcrProcessing(format!("{e:?}")))
    }
}

/// Build the engine the build supports, logging what was chosen.
pub fn build_engine() -> Arc<dyn OcrEngine> {
    #[cfg(feature = "ocr")]
    {
        match TesseractOcr::discover() {
            Ok(engine) => {
                tracing::info!("Tesseract OCR engine ready");
                return Arc::new(engine);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Tesseract unavailable, image uploads will fail");
            }
        }
    }
    tracing::info!("OCR engine not compiled in (build without 'ocr' feature)");
    Arc::new(UnavailableOcr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_engine_reports_itself() {
        let err = UnavailableOcr
            .recognize(Path::new("/tmp/whatever.png"), "eng")
            .unwrap_err();
        assert!(matches!(err, ExtractionError::OcrUnavailable));
        assert!(err.to_string().contains("OCR engine not compiled in"));
    }
}
