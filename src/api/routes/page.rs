//! Page Routes
//!
//! - GET / - The rendered dashboard
//! - GET /api/v1/layout - The page tree as JSON

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::state::AppState;
use crate::layout::Page;

/// GET /
///
/// Serves the page rendered at start-up.
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.html.as_ref().clone())
}

/// GET /api/v1/layout
pub async fn layout(State(state): State<Arc<AppState>>) -> Json<Page> {
    Json(state.page.as_ref().clone())
}
