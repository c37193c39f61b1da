//! Application State
//!
//! Shared state accessible by all API handlers.
//! Everything here is immutable after start-up, so handlers only ever read.

use std::sync::Arc;
use std::time::Instant;

use crate::aggregate::DashboardSummary;
use crate::callbacks::CallbackRegistry;
use crate::config::{ApiConfig, DashboardConfig};
use crate::dataset::Dataset;
use crate::layout::{self, Page};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// The loaded country table
    pub dataset: Arc<Dataset>,
    /// Selector → output bindings
    pub registry: Arc<CallbackRegistry>,
    /// Assembled page tree
    pub page: Arc<Page>,
    /// Page rendered once at start-up
    pub html: Arc<String>,
    /// Card values, computed once
    pub summary: DashboardSummary,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Assemble and render the page, then wrap everything for sharing
    pub fn new(
        dataset: Dataset,
        registry: CallbackRegistry,
        dashboard: &DashboardConfig,
        config: ApiConfig,
    ) -> Self {
        let page = layout::assemble(&dataset, dashboard, &registry);
        let html = page.render_html();
        let summary = DashboardSummary::compute(&dataset);

        tracing::debug!(
            graphs = page.graphs().len(),
            bytes = html.len(),
            "Rendered dashboard page"
        );

        Self {
            dataset: Arc::new(dataset),
            registry: Arc::new(registry),
            page: Arc::new(page),
            html: Arc::new(html),
            summary,
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
