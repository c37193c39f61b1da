//! CSV loading
//!
//! Parses the dataset into typed `CountryRecord`s. The header is checked for
//! every required column before any row is read, so a schema mismatch is
//! reported as one error listing all missing columns.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

use super::error::{DataError, DataResult};
use super::types::{CategoryColumn, CountryRecord, Dataset, NumericColumn};
use crate::aggregate::summary_count;

/// Columns the dashboard reads; any others are ignored
pub const REQUIRED_COLUMNS: [&str; 5] = [
    CategoryColumn::Country.header(),
    CategoryColumn::Continent.header(),
    NumericColumn::TotalCases.header(),
    NumericColumn::TotalDeaths.header(),
    CategoryColumn::IsoCode.header(),
];

impl Dataset {
    /// Load the dataset from a CSV file
    pub fn load(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let start = Instant::now();

        let file = File::open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound(path.to_path_buf()),
            _ => DataError::Io(e),
        })?;

        let dataset = Self::from_reader(file, path.display().to_string())?;

        tracing::info!(
            path = %path.display(),
            rows = dataset.len(),
            continents = summary_count(&dataset, CategoryColumn::Continent),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Loaded dataset"
        );

        Ok(dataset)
    }

    /// Load the dataset from any reader (useful for testing)
    pub fn from_reader<R: Read>(reader: R, source: impl Into<String>) -> DataResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        check_required_columns(&headers)?;

        let mut records = Vec::new();
        for (row_num, result) in reader.deserialize::<CountryRecord>().enumerate() {
            // Header is line 1
            let fallback_line = row_num + 2;

            let record = result.map_err(|e| DataError::MalformedRow {
                line: e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(fallback_line),
                reason: e.to_string(),
            })?;

            validate_record(&record).map_err(|reason| DataError::MalformedRow {
                line: fallback_line,
                reason,
            })?;

            records.push(record);
        }

        if records.is_empty() {
            return Err(DataError::Empty);
        }

        Ok(Dataset::with_source(records, source))
    }
}

fn check_required_columns(headers: &csv::StringRecord) -> DataResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DataError::MissingColumns(missing))
    }
}

fn validate_record(record: &CountryRecord) -> Result<(), String> {
    if record.country.is_empty() {
        return Err("empty Country".to_string());
    }
    if record.continent.is_empty() {
        return Err(format!("empty Continent for {}", record.country));
    }
    Ok(())
}
