//! Languages offered by the upload form.
//!
//! Any language code is accepted and echoed back; this list drives the
//! `/api/languages` endpoint and the language name in synthesis logs.

use serde::Serialize;

/// A selectable content language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// ISO 639-1 code
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "de", name: "German" },
    Language { code: "ja", name: "Japanese" },
    Language { code: "ko", name: "Korean" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "pt", name: "Portuguese" },
    Language { code: "ru", name: "Russian" },
    Language { code: "hi", name: "Hindi" },
];

impl Language {
    /// Find a supported language by code (case-insensitive).
    pub fn find(code: &str) -> Option<&'static Language> {
        let code = code.trim();
        SUPPORTED_LANGUAGES
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
    }
}
