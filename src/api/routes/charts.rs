//! Chart Routes
//!
//! - GET /api/v1/charts/:id - Initial figure of a graph on the page
//! - POST /api/v1/update - Recompute the outputs bound to a changed input

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::{FigureResponse, OutputFigure, UpdateRequest, UpdateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/charts/:id
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<FigureResponse>> {
    let chart = state
        .page
        .graph(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Graph '{}' not found", id)))?;

    Ok(Json(FigureResponse {
        kind: chart.kind().to_string(),
        figure: chart.to_figure(),
        id,
    }))
}

/// POST /api/v1/update
///
/// Runs every handler bound to `input_id` against the new value. An empty
/// match is not an error; the ranking comes back as a placeholder chart.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    validate_update_request(&req)?;

    let updates = state
        .registry
        .dispatch(&state.dataset, &req.input_id, &req.value)?;

    tracing::info!(
        input = %req.input_id,
        value = %req.value,
        outputs = updates.len(),
        "Updated outputs"
    );

    Ok(Json(UpdateResponse {
        outputs: updates
            .into_iter()
            .map(|update| OutputFigure {
                figure: update.chart.to_figure(),
                id: update.id,
            })
            .collect(),
    }))
}

fn validate_update_request(req: &UpdateRequest) -> ApiResult<()> {
    if req.input_id.trim().is_empty() {
        return Err(ApiError::Validation("input_id cannot be empty".to_string()));
    }
    Ok(())
}
