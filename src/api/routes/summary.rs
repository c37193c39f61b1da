//! Summary Routes
//!
//! - GET /api/v1/summary - Card values and selector options

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::aggregate::distinct_values;
use crate::api::dto::SummaryResponse;
use crate::api::state::AppState;
use crate::dataset::CategoryColumn;

/// GET /api/v1/summary
pub async fn get_summary(State(state): State<Arc<AppState>>) -> Json<SummaryResponse> {
    let summary = state.summary;

    Json(SummaryResponse {
        countries: summary.countries,
        continents: summary.continents,
        total_cases: summary.total_cases,
        total_deaths: summary.total_deaths,
        continent_options: distinct_values(&state.dataset, CategoryColumn::Continent),
        source: state.dataset.source().to_string(),
        loaded_at: state.dataset.loaded_at().to_rfc3339(),
    })
}
