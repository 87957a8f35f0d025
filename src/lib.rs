#![deny(rust_2018_idioms)]

pub mod reconcile;

pub use reconcile::function::reconcile;

pub mod catalog;
pub mod lookup;
pub mod normalize;
pub mod rules;
pub mod scholarship;

/// Phrases in price cells meaning the program is offered with a full scholarship only,
/// i.e. its effective price is zero no matter what else the cell contains.
/// Matched after `normalize::search_fold`, so casing and dotted/dotless i don't matter.
pub const FULL_SCHOLARSHIP_PHRASES: &[&str] = &[
    "sadece tam burslu",
    "yalnızca tam burs",
    "tam burslu alımı",
    "sadece burslu",
];

/// Parse a tuition price as found in hand-collected CSVs, where both `₺450,000.00` and
/// `455.000₺` styles occur, sometimes within the same column.
///
/// Returns `Some(0.0)` for cells that state the program is full-scholarship only,
/// and `None` for empty or unparseable cells. `None` means "no price known" and is
/// distinct from a price of zero.
pub fn parse_price(price: &str) -> Option<f64> {
    let folded = normalize::search_fold(price.trim());
    if folded.is_empty() {
        return None;
    }
    if FULL_SCHOLARSHIP_PHRASES
        .iter()
        .any(|p| folded.contains(&normalize::search_fold(p)))
    {
        return Some(0.0);
    }

    let cleaned: String = price
        .chars()
        .filter(|c| *c != '₺' && !c.is_whitespace())
        .collect();

    let cleaned = if cleaned.contains(',') && cleaned.contains('.') {
        // thousands-comma/decimal-dot style
        cleaned.replace(',', "")
    } else if cleaned.contains('.') {
        // Dots group thousands in the local style ("1.127.500") but can also be a
        // decimal point ("455.00") - grouped segments are always 3 characters wide.
        let segments: Vec<&str> = cleaned.split('.').collect();
        if segments[1..].iter().all(|s| s.len() == 3) {
            cleaned.replace('.', "")
        } else {
            cleaned
        }
    } else if cleaned.contains(',') {
        cleaned.replace(',', "")
    } else {
        cleaned
    };

    cleaned.parse::<f64>().ok()
}
