//! Scholarship label classification.

use crate::normalize::turkish_upper;

/// Map a free-text scholarship label to its discount percentage.
///
/// First match wins; the label text is messy enough that several digit substrings
/// can occur at once, so the precedence order here is load-bearing. The exact-label
/// arms list the Turkish-folded spelling next to the plain-ASCII ones the collectors
/// also type. Unrecognized labels (including empty) fall through to 0, i.e. full fee.
pub fn scholarship_pct(label: &str) -> u8 {
    let label = turkish_upper(label.trim());

    if label == "BURSLU" || label.contains("TAM BURS") || label.contains("100") {
        100
    } else if label.contains("75") {
        75
    } else if label.contains("50") || label.contains("YARIM") {
        50
    } else if label.contains("25") {
        25
    } else if matches!(label.as_str(), "ÜCRETLİ" | "UCRETLİ" | "UCRETLI") {
        0
    } else if matches!(label.as_str(), "ÜCRETSİZ" | "UCRETSİZ" | "UCRETSIZ") {
        // state institutions, tuition-free
        100
    } else {
        0
    }
}
