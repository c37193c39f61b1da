//! Dataset Loader
//!
//! Reads the COVID-19 CSV into an immutable, typed in-memory table.
//!
//! - **types**: `CountryRecord`, `Dataset` and the typed column selectors
//! - **loader**: CSV parsing and schema validation
//! - **error**: Error types
//!
//! The table is loaded once at start-up and shared read-only (`Arc<Dataset>`)
//! by every handler. Schema problems surface here, before the server binds.
//!
//! # Example
//!
//! ```rust,no_run
//! use covid_dashboard::dataset::{CategoryColumn, Dataset};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load("COVID-19_Coronavirus.csv")?;
//!     println!("{} rows from {}", dataset.len(), dataset.source());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod types;

pub use error::{DataError, DataResult};
pub use loader::REQUIRED_COLUMNS;
pub use types::{CategoryColumn, CountryRecord, Dataset, NumericColumn};
