//! Loading of the master program roster, the canonical list of every
//! program-variant a university offers, one row per scholarship tier.

use crate::normalize::Normalizer;
use crate::scholarship::scholarship_pct;

/// The `university_type` value marking state institutions, which have no priced
/// tuition and are excluded from reconciliation.
pub const PUBLIC_INSTITUTION: &str = "Devlet";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("A required column named '{name}' could not be found in the first line of the roster")]
    MissingColumn { name: &'static str },
    #[error("Row in line {line} did not have a column at index {index}")]
    ColumnMissingInRow { line: u64, index: usize },
}

/// One roster row with its derived lookup fields, computed once at load.
#[derive(Debug, Clone)]
pub struct Program {
    /// Stable identifier of this program + scholarship-tier combination,
    /// unique within a single roster source.
    pub variant_id: String,
    /// Display names, kept verbatim for output.
    pub university: String,
    pub program: String,
    pub program_detail: String,
    pub scholarship: String,
    pub institution_kind: String,
    /// Canonicalized names used for joining against the price collection.
    pub university_key: String,
    pub program_key: String,
    pub is_english: bool,
    pub scholarship_pct: u8,
}

impl Program {
    pub fn is_public(&self) -> bool {
        self.institution_kind == PUBLIC_INSTITUTION
    }
}

/// Load one roster source. Column order is irrelevant; `yop_kodu`, `university`
/// and `program` must be present, the remaining columns default to empty.
pub fn load(source: impl std::io::Read, normalizer: &Normalizer) -> Result<Vec<Program>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(source);
    let headers = csv.headers()?.clone();

    let id_idx = required_idx("yop_kodu", &headers)?;
    let university_idx = required_idx("university", &headers)?;
    let program_idx = required_idx("program", &headers)?;
    let detail_idx = header_idx("program_detail", &headers);
    let scholarship_idx = header_idx("scholarship", &headers);
    let kind_idx = header_idx("university_type", &headers);

    let mut programs = Vec::new();
    for record in csv.into_records() {
        let record = record?;
        let university = required_field(&record, university_idx)?.to_string();
        let program = required_field(&record, program_idx)?.to_string();
        let program_detail = optional_field(&record, detail_idx).to_string();
        let scholarship = optional_field(&record, scholarship_idx).to_string();

        programs.push(Program {
            variant_id: required_field(&record, id_idx)?.to_string(),
            university_key: normalizer.university_key(&university),
            program_key: normalizer.program_key(&program),
            is_english: normalizer.is_english_track(&program, &program_detail),
            scholarship_pct: scholarship_pct(&scholarship),
            institution_kind: optional_field(&record, kind_idx).to_string(),
            university,
            program,
            program_detail,
            scholarship,
        });
    }
    Ok(programs)
}

/// Return the position of `name` in `headers` or `None` if it wasn't found.
fn header_idx(name: &str, headers: &csv::StringRecord) -> Option<usize> {
    headers.iter().position(|header| header == name)
}

fn required_idx(name: &'static str, headers: &csv::StringRecord) -> Result<usize, Error> {
    header_idx(name, headers).ok_or(Error::MissingColumn { name })
}

fn required_field(record: &csv::StringRecord, index: usize) -> Result<&str, Error> {
    record.get(index).ok_or_else(|| Error::ColumnMissingInRow {
        line: record.position().expect("present").line(),
        index,
    })
}

fn optional_field<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> &'a str {
    index.and_then(|index| record.get(index)).unwrap_or("")
}
