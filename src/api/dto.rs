//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================
// SUMMARY DTOs
// ============================================

/// Summary card values
#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Distinct countries
    pub countries: usize,
    /// Distinct continents
    pub continents: usize,
    pub total_cases: u64,
    pub total_deaths: u64,
    /// Selector options, in first-appearance order
    pub continent_options: Vec<String>,
    /// Where the table was loaded from
    pub source: String,
    /// Load time (ISO 8601)
    pub loaded_at: String,
}

// ============================================
// UPDATE DTOs
// ============================================

/// Selector change posted by the page
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Id of the changed input
    pub input_id: String,
    /// Newly selected value
    pub value: String,
}

/// Replacement figure for one output
#[derive(Debug, Serialize)]
pub struct OutputFigure {
    /// Graph id on the page
    pub id: String,
    /// Plotly figure (`data` + `layout`)
    pub figure: Value,
}

/// Every output bound to the changed input
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub outputs: Vec<OutputFigure>,
}

// ============================================
// CHART DTOs
// ============================================

/// Initial figure of one graph
#[derive(Debug, Serialize)]
pub struct FigureResponse {
    pub id: String,
    /// Chart kind: choropleth, bar, pie
    pub kind: String,
    pub figure: Value,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded"
    pub status: String,
    /// Dataset status: "ok" or "empty"
    pub dataset: String,
    /// Loaded rows
    pub rows: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
