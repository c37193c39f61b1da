//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard page
//! - `GET /api/v1/layout` - The page tree as JSON
//!
//! ## Data
//! - `GET /api/v1/summary` - Summary card values and continent options
//! - `GET /api/v1/charts/:id` - Initial figure of a graph
//! - `POST /api/v1/update` - Selector change, returns replacement figures
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_dashboard::api::{serve, AppState};
//! use covid_dashboard::callbacks::CallbackRegistry;
//! use covid_dashboard::config::Config;
//! use covid_dashboard::dataset::Dataset;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let dataset = Dataset::load(&config.dataset.path)?;
//!     let registry = CallbackRegistry::dashboard(config.dashboard.top_n)?;
//!
//!     let state = AppState::new(dataset, registry, &config.dashboard, config.api.clone());
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/summary", get(routes::summary::get_summary))
        .route("/layout", get(routes::page::layout))
        .route("/charts/:id", get(routes::charts::get_chart))
        .route("/update", post(routes::charts::update));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// Permissive unless origins are configured
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callbacks::CallbackRegistry;
    use crate::config::DashboardConfig;
    use crate::dataset::{CountryRecord, Dataset};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let dataset = Dataset::from_records(vec![
            CountryRecord::new("France", "Europe", 100, 10, "FRA"),
            CountryRecord::new("Italy", "Europe", 200, 20, "ITA"),
            CountryRecord::new("Japan", "Asia", 300, 5, "JPN"),
            CountryRecord::new("Brazil", "South America", 400, 40, "BRA"),
        ]);
        let dashboard = DashboardConfig::default();
        let registry = CallbackRegistry::dashboard(dashboard.top_n).unwrap();

        build_router(AppState::new(
            dataset,
            registry,
            &dashboard,
            ApiConfig::default(),
        ))
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = create_test_app().oneshot(get("/health/live")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = create_test_app().oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = create_test_app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["rows"], 4);
    }

    #[tokio::test]
    async fn test_index_lists_continents() {
        let response = create_test_app().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"<option value="Europe" selected>Europe</option>"#));
        assert!(html.contains(r#"<option value="South America">South America</option>"#));
        assert!(html.contains(r#"id="plotcases""#));
    }

    #[tokio::test]
    async fn test_summary() {
        let response = create_test_app().oneshot(get("/api/v1/summary")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["countries"], 4);
        assert_eq!(body["continents"], 3);
        assert_eq!(body["total_cases"], 1000);
        assert_eq!(body["total_deaths"], 75);
        assert_eq!(body["source"], "memory");
        assert_eq!(
            body["continent_options"],
            serde_json::json!(["Europe", "Asia", "South America"])
        );
    }

    #[tokio::test]
    async fn test_layout() {
        let response = create_test_app().oneshot(get("/api/v1/layout")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Covid-19 Dashboard Analytics");
        assert_eq!(body["root"]["type"], "container");
    }

    #[tokio::test]
    async fn test_update_returns_both_rankings() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/v1/update",
                r#"{"input_id": "choose_continent", "value": "Europe"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let outputs = body["outputs"].as_array().unwrap();
        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs[0]["id"], "plotcases");
        assert_eq!(outputs[1]["id"], "plotdeaths");

        let deaths = &outputs[1]["figure"];
        assert_eq!(deaths["data"][0]["y"], serde_json::json!(["France", "Italy"]));
        assert_eq!(deaths["data"][0]["x"], serde_json::json!([10, 20]));
    }

    #[tokio::test]
    async fn test_update_absent_continent_is_placeholder() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/v1/update",
                r#"{"input_id": "choose_continent", "value": "Atlantis"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        for output in body["outputs"].as_array().unwrap() {
            assert_eq!(output["figure"]["data"], serde_json::json!([]));
        }
    }

    #[tokio::test]
    async fn test_update_unknown_input() {
        let response = create_test_app()
            .oneshot(post_json(
                "/api/v1/update",
                r#"{"input_id": "choose_country", "value": "France"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNKNOWN_INPUT");
        assert!(body["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_update_invalid_json() {
        let response = create_test_app()
            .oneshot(post_json("/api/v1/update", "not json"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn test_update_empty_input_id() {
        let response = create_test_app()
            .oneshot(post_json("/api/v1/update", r#"{"input_id": " ", "value": "Asia"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_chart() {
        let response = create_test_app()
            .oneshot(get("/api/v1/charts/plotmap"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["kind"], "choropleth");
        assert_eq!(body["figure"]["data"][0]["locationmode"], "ISO-3");
    }

    #[tokio::test]
    async fn test_get_chart_not_found() {
        let response = create_test_app()
            .oneshot(get("/api/v1/charts/nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
