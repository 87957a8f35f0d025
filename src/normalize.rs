//! Canonicalization of the free-text identifiers the two datasets share.
//!
//! Neither dataset carries an identifier the other knows about, so rows can only be
//! joined on (university, program, language track) after both sides are reduced to
//! the same canonical spelling.

use crate::rules::Rules;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid program strip pattern '{pattern}'")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Parenthesized qualifiers in university names, commonly a campus city.
static PARENTHESIZED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*").expect("valid literal pattern"));

/// Uppercase with the Turkish dotted/dotless i distinction kept intact: `i`
/// becomes `İ` and `ı` becomes `I`, so mixed-case input folds to the same
/// alphabet the canonical rosters are written in. Plain `str::to_uppercase`
/// maps `i` to ASCII `I` and makes keys from differently-cased rows diverge.
pub fn turkish_upper(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'i' => out.push('İ'),
            'ı' => out.push('I'),
            _ => out.extend(c.to_uppercase()),
        }
    }
    out
}

/// Lowercase for substring matching: every dotted or dotless i variant collapses
/// to plain `i`, so a marker like `ingilizce` or `(ing)` is found no matter which
/// casing convention a row uses.
pub fn search_fold(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'İ' | 'I' | 'ı' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// A `Rules` table with its patterns compiled, built once per run.
pub struct Normalizer {
    rules: Rules,
    strip_patterns: Vec<Regex>,
}

impl Normalizer {
    pub fn new(rules: &Rules) -> Result<Self, Error> {
        let strip_patterns = rules
            .program_strip_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| Error::Pattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Normalizer {
            rules: rules.clone(),
            strip_patterns,
        })
    }

    /// The canonical form of a university name: parenthesized qualifiers dropped,
    /// uppercased, whitespace collapsed, spelling variants unified.
    /// Idempotent, and empty input stays empty.
    pub fn university_key(&self, name: &str) -> String {
        let name = PARENTHESIZED.replace_all(name, " ");
        let mut name = collapse_whitespace(&turkish_upper(&name));
        for replacement in &self.rules.university_replacements {
            name = name.replace(&replacement.from, &replacement.to);
        }
        name.trim().to_string()
    }

    /// The canonical form of a program name: uppercased, with language-track,
    /// duration, fee-status and discount annotations stripped. Idempotent.
    pub fn program_key(&self, name: &str) -> String {
        let mut name = turkish_upper(name.trim());
        for pattern in &self.strip_patterns {
            name = pattern.replace_all(&name, " ").into_owned();
        }
        collapse_whitespace(&name)
    }

    /// Whether a program belongs to the English-medium instruction track.
    ///
    /// A permissive substring test over name and detail combined - the datasets
    /// annotate the track in either field, in either long or abbreviated form.
    pub fn is_english_track(&self, name: &str, detail: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        let combined = search_fold(&format!("{} {}", name, detail));
        self.rules
            .english_markers
            .iter()
            .any(|marker| combined.contains(&search_fold(marker)))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::new(&Rules::default()).expect("built-in patterns compile")
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
