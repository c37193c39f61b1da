//! Reactive Update Handlers
//!
//! The page has one selector (`choose_continent`) and two outputs it drives
//! (`plotcases`, `plotdeaths`). Each output is owned by exactly one handler;
//! every selector change is a full recompute from the base table.
//!
//! - **handler**: `UpdateHandler` trait and the ranking handler
//! - **registry**: explicit input → handler → output bindings

pub mod handler;
pub mod registry;

pub use handler::{RankingHandler, UpdateHandler};
pub use registry::{CallbackError, CallbackRegistry, OutputUpdate};

/// Continent selector
pub const CONTINENT_INPUT: &str = "choose_continent";

/// Ranking of total cases in the selected continent
pub const CASES_OUTPUT: &str = "plotcases";

/// Ranking of total deaths in the selected continent
pub const DEATHS_OUTPUT: &str = "plotdeaths";
