use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{AgeRange, RuleRecord};

/// Separator between scheme names in the `Eligible Schemes` column
pub const SCHEME_SEPARATOR: &str = ", ";

/// Errors that abort loading the whole rule table
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Rule source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Failed to open rule source {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read header of rule source {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Reasons a single row is skipped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowParseError {
    #[error("invalid age range '{0}', expected '<min>-<max>'")]
    InvalidAgeRange(String),

    #[error("age range '{0}' has a minimum above its maximum")]
    InvertedAgeRange(String),

    #[error("missing value for column '{0}'")]
    MissingField(&'static str),

    #[error("unreadable record: {0}")]
    Record(String),
}

/// A skipped row and why it was skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// Line in the source file where the row starts
    pub line: u64,
    pub error: RowParseError,
}

/// Parsed rule table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    pub records: Vec<RuleRecord>,
    pub diagnostics: Vec<RowDiagnostic>,
}

/// CSV row as found in the source. Missing or empty cells come through as `None`.
#[derive(Debug, Deserialize)]
struct RawRuleRow {
    #[serde(rename = "Age")]
    age: Option<String>,
    #[serde(rename = "Income Range")]
    income_range: Option<String>,
    #[serde(rename = "Employment Status")]
    employment_status: Option<String>,
    #[serde(rename = "Residency")]
    residency: Option<String>,
    #[serde(rename = "Eligible Schemes")]
    eligible_schemes: Option<String>,
}

/// Load the rule table from a CSV file.
///
/// Rows that fail to parse are skipped and recorded in
/// [`RuleTable::diagnostics`]; only a missing or unreadable source is an error.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<RuleTable, LoadError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::SourceUnreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let table = read_rules(file).map_err(|e| LoadError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    for diagnostic in &table.diagnostics {
        tracing::warn!(
            "Skipping rule row at {}:{}: {}",
            path.display(),
            diagnostic.line,
            diagnostic.error
        );
    }

    tracing::debug!(
        "Loaded {} rules from {} ({} rows skipped)",
        table.records.len(),
        path.display(),
        table.diagnostics.len()
    );

    Ok(table)
}

/// Parse a rule table from any reader. Fails only if the header row is unreadable.
pub fn read_rules<R: Read>(source: R) -> Result<RuleTable, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let mut table = RuleTable::default();

    for (index, result) in reader.records().enumerate() {
        // Header occupies line 1
        let fallback_line = index as u64 + 2;

        let parsed = result
            .map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                (line, RowParseError::Record(e.to_string()))
            })
            .and_then(|record| {
                let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);
                parse_record(&record, &headers).map_err(|e| (line, e))
            });

        match parsed {
            Ok(rule) => table.records.push(rule),
            Err((line, error)) => table.diagnostics.push(RowDiagnostic { line, error }),
        }
    }

    Ok(table)
}

fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<RuleRecord, RowParseError> {
    let raw: RawRuleRow = record
        .deserialize(Some(headers))
        .map_err(|e| RowParseError::Record(e.to_string()))?;

    let age_range = parse_age_range(&required(raw.age, "Age")?)?;
    let income_range = required(raw.income_range, "Income Range")?;
    let employment_status = required(raw.employment_status, "Employment Status")?;
    let residency = required(raw.residency, "Residency")?;

    let eligible_schemes = parse_schemes(&required(raw.eligible_schemes, "Eligible Schemes")?);
    if eligible_schemes.is_empty() {
        return Err(RowParseError::MissingField("Eligible Schemes"));
    }

    Ok(RuleRecord {
        age_range,
        income_range,
        employment_status,
        residency,
        eligible_schemes,
    })
}

fn required(value: Option<String>, column: &'static str) -> Result<String, RowParseError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(RowParseError::MissingField(column))
}

/// Parse `"<min>-<max>"`. Exactly one hyphen is allowed, so negative bounds are rejected.
pub fn parse_age_range(raw: &str) -> Result<AgeRange, RowParseError> {
    let invalid = || RowParseError::InvalidAgeRange(raw.to_string());

    let mut parts = raw.split('-');
    let (min, max) = match (parts.next(), parts.next(), parts.next()) {
        (Some(min), Some(max), None) => (min.trim(), max.trim()),
        _ => return Err(invalid()),
    };

    let min = min.parse::<u32>().map_err(|_| invalid())?;
    let max = max.parse::<u32>().map_err(|_| invalid())?;

    AgeRange::new(min, max).ok_or_else(|| RowParseError::InvertedAgeRange(raw.to_string()))
}

/// Split the `Eligible Schemes` cell into names, dropping empty entries
pub fn parse_schemes(raw: &str) -> Vec<String> {
    raw.split(SCHEME_SEPARATOR)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
