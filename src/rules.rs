//! Normalization rule tables, serializable so the built-in defaults can be
//! overridden from a RON file when a new spelling variant shows up in the data.

use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open rules file for reading")]
    Open(#[from] std::io::Error),
    #[error("Could not decode the normalization rules")]
    Decode(#[from] ron::de::SpannedError),
}

/// A literal spelling-variant substitution applied to normalized university names.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rules {
    /// Applied to uppercased university names after parenthesized qualifiers are dropped.
    pub university_replacements: Vec<Replacement>,
    /// Regex patterns removed from uppercased program names, each applied to the
    /// full string; they strip language-track, duration and fee-status annotations.
    pub program_strip_patterns: Vec<String>,
    /// Substrings of `name + detail` (lowercased) that mark the English-medium track.
    pub english_markers: Vec<String>,
}

impl Default for Rules {
    fn default() -> Self {
        fn replace(from: &str, to: &str) -> Replacement {
            Replacement {
                from: from.into(),
                to: to.into(),
            }
        }
        Rules {
            // Both the Turkish-folded and the plain-ASCII transliterated spelling
            // occur in the wild; unify them to the canonical diacritic form.
            university_replacements: vec![
                replace("UNİVERSİTESİ", "ÜNİVERSİTESİ"),
                replace("UNIVERSITESI", "ÜNİVERSİTESİ"),
            ],
            program_strip_patterns: [
                r"\s*\(İNGİLİZCE\)\s*",
                r"\s*\(TÜRKÇE\)\s*",
                r"\s*\(\d+ YILLIK\)\s*",
                r"\s*İNGİLİZCE\s*$",
                r"\s*TÜRKÇE\s*$",
                r"\s*\(ÜCRETLİ\)\s*",
                r"\s*\(BURSLU\)\s*",
                r"\s*ÜCRETLİ\s*$",
                r"\s*BURSLU\s*$",
                r"\s*\(%\d+\s*İNDİRİMLİ\)\s*",
            ]
            .into_iter()
            .map(Into::into)
            .collect(),
            english_markers: vec!["ingilizce".into(), "(ing)".into()],
        }
    }
}

impl Rules {
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        Ok(ron::de::from_reader(std::fs::File::open(path)?)?)
    }
}
