//! The price lookup table built from the hand-collected price document.
//!
//! Every retained row is keyed by canonicalized names plus language track. The
//! collection's own track classification is less reliable than the roster's, so
//! `resolve` falls back across tracks rather than failing on an inexact flag.

use crate::normalize::Normalizer;
use crate::parse_price;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PriceKey {
    pub university: String,
    pub program: String,
    pub english: bool,
}

/// Base (full-fee) prices per academic year. `None` means no price was collected
/// for that year; a genuine zero means full-scholarship-only.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct YearPrices {
    pub y2024: Option<f64>,
    pub y2025: Option<f64>,
}

#[derive(Debug, Default)]
pub struct PriceBook {
    prices: HashMap<PriceKey, YearPrices>,
    /// Raw rows read, including ones discarded for lack of a parseable price.
    pub rows_read: usize,
}

impl PriceBook {
    /// Build the lookup table from the price collection CSV.
    ///
    /// The collection is messy by nature: a column absent from the header or a
    /// short row just yields empty fields, and rows without a parseable price in
    /// either year are dropped silently. When two rows normalize to the same key,
    /// each year's value is overwritten independently by the later row.
    pub fn from_reader(
        source: impl std::io::Read,
        normalizer: &Normalizer,
    ) -> Result<Self, Error> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(source);
        let headers = csv.headers()?.clone();
        let university_idx = header_idx("original_university", &headers);
        let program_idx = header_idx("original_department", &headers);
        let price_2025_idx = header_idx("original_price_2025", &headers);
        let price_2024_idx = header_idx("price_2024_TL", &headers);

        let mut book = PriceBook::default();
        for record in csv.into_records() {
            let record = record?;
            book.rows_read += 1;

            let field = |index: Option<usize>| -> String {
                index
                    .and_then(|index| record.get(index))
                    .unwrap_or("")
                    .trim()
                    .to_string()
            };
            let university = field(university_idx);
            let program = field(program_idx);
            let price_2025 = parse_price(&field(price_2025_idx));
            let price_2024 = parse_price(&field(price_2024_idx));

            if price_2025.is_none() && price_2024.is_none() {
                continue;
            }

            let key = PriceKey {
                university: normalizer.university_key(&university),
                program: normalizer.program_key(&program),
                english: normalizer.is_english_track(&program, ""),
            };
            let prices = book.prices.entry(key).or_default();
            if price_2025.is_some() {
                prices.y2025 = price_2025;
            }
            if price_2024.is_some() {
                prices.y2024 = price_2024;
            }
        }
        Ok(book)
    }

    /// The number of distinct (university, program, track) keys with a price.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn get(&self, key: &PriceKey) -> Option<&YearPrices> {
        self.prices.get(key)
    }

    /// Find base prices for a roster entry, trying the entry's own language track
    /// first and then either track. Any match beats no match.
    pub fn resolve(
        &self,
        university_key: &str,
        program_key: &str,
        english: bool,
    ) -> Option<&YearPrices> {
        [english, false, true].into_iter().find_map(|track| {
            self.get(&PriceKey {
                university: university_key.to_string(),
                program: program_key.to_string(),
                english: track,
            })
        })
    }
}

fn header_idx(name: &str, headers: &csv::StringRecord) -> Option<usize> {
    headers.iter().position(|header| header == name)
}
