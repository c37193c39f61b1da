//! # Covid Dashboard
//!
//! A single-page analytics dashboard over a static COVID-19 country table.
//! The table is loaded once; the page shows summary cards, a deaths map, a
//! countries-per-continent pie, and top-5 case and death rankings driven by a
//! continent selector.
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading and the typed record table
//! - [`aggregate`]: distinct counts, sums, cross-tabs and top-N rankings
//! - [`chart`]: declarative chart specs and their Plotly figures
//! - [`layout`]: the page tree and its HTML rendering
//! - [`callbacks`]: selector → handler → output bindings
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::aggregate::top_n_by_category;
//! use covid_dashboard::dataset::{CategoryColumn, Dataset, NumericColumn};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load("COVID-19_Coronavirus.csv")?;
//!
//!     let top = top_n_by_category(
//!         &dataset,
//!         CategoryColumn::Continent,
//!         "Europe",
//!         NumericColumn::TotalDeaths,
//!         5,
//!     );
//!     for record in top {
//!         println!("{}: {}", record.country, record.total_deaths);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod callbacks;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod layout;

// Re-export top-level types for convenience
pub use dataset::{
    CategoryColumn, CountryRecord, DataError, DataResult, Dataset, NumericColumn,
};

pub use aggregate::{
    cross_tab_count, cross_tab_sum, distinct_values, summary_count, summary_sum,
    top_n_by_category, DashboardSummary, GroupTotal,
};

pub use chart::{ChartSpec, ColorScale, Template};

pub use layout::{assemble, Node, Page};

pub use callbacks::{CallbackError, CallbackRegistry, OutputUpdate, UpdateHandler};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoadedConfig, LoggingConfig};
