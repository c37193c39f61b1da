//! Core data types for the dashboard dataset
//!
//! - `CountryRecord`: one validated CSV row
//! - `Dataset`: the immutable record table
//! - `CategoryColumn` / `NumericColumn`: typed column selectors used by the
//!   aggregation layer instead of string-keyed lookups

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single country row
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryRecord {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Continent")]
    pub continent: String,
    #[serde(rename = "Total Cases")]
    pub total_cases: u64,
    #[serde(rename = "Total Deaths")]
    pub total_deaths: u64,
    /// ISO-3166-1 alpha-3 code, the join key for the map
    #[serde(rename = "ISO 3166-1 alpha-3 CODE")]
    pub iso_code: String,
}

impl CountryRecord {
    pub fn new(
        country: impl Into<String>,
        continent: impl Into<String>,
        total_cases: u64,
        total_deaths: u64,
        iso_code: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            continent: continent.into(),
            total_cases,
            total_deaths,
            iso_code: iso_code.into(),
        }
    }
}

/// Low-cardinality or key columns that rows can be grouped and filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColumn {
    Country,
    Continent,
    IsoCode,
}

impl CategoryColumn {
    /// Header name in the source CSV
    pub const fn header(self) -> &'static str {
        match self {
            CategoryColumn::Country => "Country",
            CategoryColumn::Continent => "Continent",
            CategoryColumn::IsoCode => "ISO 3166-1 alpha-3 CODE",
        }
    }

    pub fn value(self, record: &CountryRecord) -> &str {
        match self {
            CategoryColumn::Country => &record.country,
            CategoryColumn::Continent => &record.continent,
            CategoryColumn::IsoCode => &record.iso_code,
        }
    }
}

/// Non-negative integer columns that can be summed and sorted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    TotalCases,
    TotalDeaths,
}

impl NumericColumn {
    /// Header name in the source CSV, also used as the display label
    pub const fn header(self) -> &'static str {
        match self {
            NumericColumn::TotalCases => "Total Cases",
            NumericColumn::TotalDeaths => "Total Deaths",
        }
    }

    pub fn value(self, record: &CountryRecord) -> u64 {
        match self {
            NumericColumn::TotalCases => record.total_cases,
            NumericColumn::TotalDeaths => record.total_deaths,
        }
    }
}

/// Immutable record table
///
/// Rows keep file order; the top-N tie-break relies on it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<CountryRecord>,
    source: String,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Build a table from records already in memory
    pub fn from_records(records: Vec<CountryRecord>) -> Self {
        Self::with_source(records, "memory")
    }

    pub(crate) fn with_source(records: Vec<CountryRecord>, source: impl Into<String>) -> Self {
        Self {
            records,
            source: source.into(),
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Where the rows came from (file path, or "memory")
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CountryRecord;
    type IntoIter = std::slice::Iter<'a, CountryRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
