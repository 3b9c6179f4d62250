//! Supported output languages and their Tesseract profiles.

use serde::{Deserialize, Serialize};

/// The twelve languages the service can write simplified documents in.
/// Codes are ISO 639-1 and double as the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    En,
    Hi,
    Mr,
    Gu,
    Ta,
    Te,
    Kn,
    Ml,
    Bn,
    Pa,
    Or,
    Ur,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 12] = [
        Self::En,
        Self::Hi,
        Self::Mr,
        Self::Gu,
        Self::Ta,
        Self::Te,
        Self::Kn,
        Self::Ml,
        Self::Bn,
        Self::Pa,
        Self::Or,
        Self::Ur,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Self::En),
            "hi" => Some(Self::Hi),
            "mr" => Some(Self::Mr),
            "gu" => Some(Self::Gu),
            "ta" => Some(Self::Ta),
            "te" => Some(Self::Te),
            "kn" => Some(Self::Kn),
            "ml" => Some(Self::Ml),
            "bn" => Some(Self::Bn),
            "pa" => Some(Self::Pa),
            "or" => Some(Self::Or),
            "ur" => Some(Self::Ur),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
            Self::Mr => "mr",
            Self::Gu => "gu",
            Self::Ta => "ta",
            Self::Te => "te",
            Self::Kn => "kn",
            Self::Ml => "ml",
            Self::Bn => "bn",
            Self::Pa => "pa",
            Self::Or => "or",
            Self::Ur => "ur",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "Hindi",
            Self::Mr => "Marathi",
            Self::Gu => "Gujarati",
            Self::Ta => "Tamil",
            Self::Te => "Telugu",
            Self::Kn => "Kannada",
            Self::Ml => "Malayalam",
            Self::Bn => "Bengali",
            Self::Pa => "Punjabi",
            Self::Or => "Odia",
            Self::Ur => "Urdu",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Hi => "हिन्दी",
            Self::Mr => "मराठी",
            Self::Gu => "ગુજરાતી",
            Self::Ta => "தமிழ்",
            Self::Te => "తెలుగు",
            Self::Kn => "ಕನ್ನಡ",
            Self::Ml => "മലയാളം",
            Self::Bn => "বাংলা",
            Self::Pa => "ਪੰਜਾਬੀ",
            Self::Or => "ଓଡ଼ିଆ",
            Self::Ur => "اردو",
        }
    }

    /// Tesseract traineddata profile for OCR in this language.
    pub fn tesseract_profile(&self) -> &'static str {
        match self {
            Self::En => "eng",
            Self::Hi => "hin",
            Self::Mr => "mar",
            Self::Gu => "guj",
            Self::Ta => "tam",
            Self::Te => "tel",
            Self::Kn => "kan",
            Self::Ml => "mal",
            Self::Bn => "ben",
            Self::Pa => "pan",
            Self::Or => "ori",
            Self::Ur => "urd",
        }
    }

    /// Whether the language is written in the Latin script. Non-Latin
    /// languages need an external font for the export renderers.
    pub fn is_latin_script(&self) -> bool {
        matches!(self, Self::En)
    }
}

impl std::fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
