use crate::rules::Rules;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Catalog(#[from] crate::catalog::Error),
    #[error(transparent)]
    Prices(#[from] crate::lookup::Error),
    #[error(transparent)]
    Normalize(#[from] crate::normalize::Error),
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// Normalization rule tables; the defaults cover the known data.
    pub rules: Rules,
}

/// Counters describing one reconciliation run, for the summary report.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Roster rows loaded across all sources, before deduplication.
    pub master_rows: usize,
    /// Raw rows read from the price collection.
    pub price_rows: usize,
    /// Distinct (university, program, track) keys that carry a price.
    pub price_keys: usize,
    /// Program variants written to the output.
    pub matched: usize,
    /// Program variants with no price under any track - expected, not an error.
    pub unmatched: usize,
    /// Roster rows skipped because their variant id was already processed.
    pub duplicate_variants: usize,
    /// Roster rows skipped because they belong to state institutions.
    pub public_skipped: usize,
    /// Output row count per scholarship percentage.
    pub scholarship_distribution: BTreeMap<u8, usize>,
}

pub const OUTPUT_HEADERS: &[&str] = &[
    "yop_kodu",
    "university",
    "program",
    "is_english",
    "scholarship_pct",
    "full_price_2024",
    "full_price_2025",
    "discounted_price_2024",
    "discounted_price_2025",
];

/// One priced program variant, serialized in `OUTPUT_HEADERS` order.
/// Absent prices stay absent in the output; they are never written as zero.
#[derive(Debug, serde::Serialize)]
pub struct OutputRecord {
    pub yop_kodu: String,
    pub university: String,
    pub program: String,
    pub is_english: bool,
    pub scholarship_pct: u8,
    pub full_price_2024: Option<f64>,
    pub full_price_2025: Option<f64>,
    pub discounted_price_2024: Option<f64>,
    pub discounted_price_2025: Option<f64>,
}

pub(crate) mod function {
    use super::{Error, Options, Outcome, OutputRecord, OUTPUT_HEADERS};
    use crate::lookup::PriceBook;
    use crate::normalize::Normalizer;
    use crate::{catalog, catalog::Program};
    use std::collections::HashSet;

    /// Join every unique program variant of the master roster(s) against the price
    /// collection and write one priced row per variant to `out`.
    ///
    /// Roster sources are concatenated in the order given, and a variant id is
    /// processed at most once overall - the first occurrence wins. Scholarship
    /// discounts apply per variant: all tiers of a program share one base price.
    pub fn reconcile(
        master_data: impl IntoIterator<Item = impl std::io::Read>,
        price_data: impl std::io::Read,
        out: impl std::io::Write,
        Options { rules }: Options,
    ) -> Result<Outcome, Error> {
        let normalizer = Normalizer::new(&rules)?;

        let mut programs = Vec::<Program>::new();
        for source in master_data {
            programs.extend(catalog::load(source, &normalizer)?);
        }
        let book = PriceBook::from_reader(price_data, &normalizer)?;

        let mut outcome = Outcome {
            master_rows: programs.len(),
            price_rows: book.rows_read,
            price_keys: book.len(),
            ..Default::default()
        };

        let mut out = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(out);
        out.write_record(OUTPUT_HEADERS)?;

        let mut seen_variants = HashSet::<String>::new();
        for program in &programs {
            if !seen_variants.insert(program.variant_id.clone()) {
                outcome.duplicate_variants += 1;
                continue;
            }
            if program.is_public() {
                outcome.public_skipped += 1;
                continue;
            }

            let prices = match book.resolve(
                &program.university_key,
                &program.program_key,
                program.is_english,
            ) {
                Some(prices) => prices,
                None => {
                    outcome.unmatched += 1;
                    continue;
                }
            };

            let multiplier = 1.0 - f64::from(program.scholarship_pct) / 100.0;
            out.serialize(OutputRecord {
                yop_kodu: format_variant_id(&program.variant_id),
                university: program.university.clone(),
                program: program.program.clone(),
                is_english: program.is_english,
                scholarship_pct: program.scholarship_pct,
                full_price_2024: prices.y2024,
                full_price_2025: prices.y2025,
                discounted_price_2024: prices.y2024.map(|p| p * multiplier),
                discounted_price_2025: prices.y2025.map(|p| p * multiplier),
            })?;
            outcome.matched += 1;
            *outcome
                .scholarship_distribution
                .entry(program.scholarship_pct)
                .or_default() += 1;
        }
        out.flush().map_err(csv::Error::from)?;

        Ok(outcome)
    }

    /// Downstream consumers expect the identifier in the numeric-string form the
    /// original exports used, so a bare code gets a ".0" appended.
    fn format_variant_id(id: &str) -> String {
        if !id.is_empty() && !id.contains('.') {
            format!("{}.0", id)
        } else {
            id.to_string()
        }
    }
}
