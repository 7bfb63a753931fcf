//! Dashboard HTTP server
//!
//! Serves the rendered dashboard plus JSON views of the same data, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Rendered dashboard (`?sort=latest|change|alphabetical&map_metric=internet_access|internet_change`)
//!
//! ## Metrics
//! - `GET /api/v1/metrics` - Key metrics for the highlighted country
//! - `GET /api/v1/metrics/:country` - Key metrics for any country
//!
//! ## Charts
//! - `GET /api/v1/charts/comparison` - Dumbbell chart figure
//! - `GET /api/v1/charts/map` - Choropleth figure
//!
//! ## Data
//! - `GET /api/v1/data` - Explorer table (`?format=json|csv`)
//! - `POST /api/v1/cache/invalidate` - Drop the cached table
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use telework::api::{serve, AppState};
//! use telework::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::new(config.data.path(), config.dashboard.settings(), config.api.clone());
//!     serve(state, &config.api).await?;
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
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/metrics", get(routes::metrics::highlighted_metrics))
        .route("/metrics/:country", get(routes::metrics::country_metrics))
        .route("/charts/comparison", get(routes::charts::comparison_chart))
        .route("/charts/map", get(routes::charts::map_chart))
        .route("/data", get(routes::export::export_data))
        .route("/cache/invalidate", post(routes::health::invalidate_cache));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::page::dashboard_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let data_path = state.data_path.clone();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, data = %data_path.display(), "Dashboard listening");

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
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
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
    use crate::dashboard::{page::UNAVAILABLE_MESSAGE, DashboardSettings, TITLE};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use std::path::Path;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    const SAMPLE: &str = "\
Country,Remote_Work_2022,Remote_Work_2024,Remote_Work_Change,Remote_Work_Trend,Internet_Access_2024,Internet_Access_Change
European Union - 27 countries (from 2020),20.0,22.0,2.0,Increase,93.0,1.0
Romania,8.0,9.5,1.5,Increase,91.0,2.0
Norway,30.0,28.0,-2.0,Decrease,99.0,0.1
";

    const NO_AGGREGATE: &str = "\
Country,Remote_Work_2022,Remote_Work_2024,Remote_Work_Change,Remote_Work_Trend,Internet_Access_2024,Internet_Access_Change
Romania,8.0,9.5,1.5,Increase,91.0,2.0
Norway,30.0,28.0,-2.0,Decrease,99.0,0.1
";

    fn app_for(path: &Path) -> Router {
        let state = AppState::new(
            path,
            DashboardSettings::default(),
            ApiConfig::new("127.0.0.1", 0),
        );
        build_router(state)
    }

    fn create_test_app(csv: &str) -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, csv).unwrap();
        (app_for(&path), dir)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, _) = get(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, _) = get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_data() {
        let dir = tempdir().unwrap();
        let app = app_for(&dir.path().join("missing.csv"));
        let (status, _) = get(app, "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["rows"], 3);
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, body) = get(app, "/?sort=change&map_metric=internet_change").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(TITLE));
        assert!(body.contains("plotly"));
        assert!(body.contains("9.50%"));
    }

    #[tokio::test]
    async fn test_dashboard_page_ignores_unknown_selection() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, _) = get(app, "/?sort=bogus&map_metric=nope").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_page_missing_file() {
        let dir = tempdir().unwrap();
        let app = app_for(&dir.path().join("missing.csv"));
        let (status, body) = get(app, "/").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body.contains(UNAVAILABLE_MESSAGE));
        assert_eq!(body.matches("class=\"alert warning\"").count(), 1);
        assert!(!body.contains("plotly"));
    }

    #[tokio::test]
    async fn test_metrics() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, body) = get(app, "/api/v1/metrics").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["country"], "Romania");
        assert_eq!(json["remote_work"]["value"], "9.50%");
    }

    #[tokio::test]
    async fn test_metrics_unknown_country() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, body) = get(app, "/api/v1/metrics/Atlantis").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("COUNTRY_NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_metrics_without_aggregate() {
        let (app, _dir) = create_test_app(NO_AGGREGATE);
        let (status, body) = get(app, "/api/v1/metrics").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("DATA_QUALITY_ERROR"));
    }

    #[tokio::test]
    async fn test_comparison_chart() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, body) = get(app, "/api/v1/charts/comparison?sort=alphabetical").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["sort"], "alphabetical");
        assert_eq!(json["reference"], 22.0);
        assert_eq!(json["figure"]["data"].as_array().unwrap().len(), 3);
        assert!(json["figure"]["layout"]["annotations"]
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a["text"] == "EU Average 2024"));
    }

    #[tokio::test]
    async fn test_map_chart() {
        let (app, _dir) = create_test_app(SAMPLE);
        let (status, body) = get(app, "/api/v1/charts/map?map_metric=internet_change").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["figure"]["data"][0]["type"], "choropleth");
        assert_eq!(json["figure"]["data"][0]["zmid"], 0.0);
    }

    #[tokio::test]
    async fn test_export_json_and_csv() {
        let (app, _dir) = create_test_app(SAMPLE);

        let (status, body) = get(app.clone(), "/api/v1/data").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["records"].as_array().unwrap().len(), 3);

        let (status, body) = get(app.clone(), "/api/v1/data?format=csv").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with("Country,"));
        assert!(body.contains("Romania,8.0,9.5"));

        let (status, _) = get(app, "/api/v1/data?format=xml").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cache_invalidate() {
        let (app, _dir) = create_test_app(SAMPLE);

        let (status, _) = get(app.clone(), "/api/v1/metrics").await;
        assert_eq!(status, StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/cache/invalidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["invalidated"], true);
        assert_eq!(json["cache"]["entries"], 0);
    }
}
