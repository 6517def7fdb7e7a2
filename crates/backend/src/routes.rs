use axum::{routing::get, Router};

use crate::api::handlers;
use crate::api::state::AppState;

/// Builds the application router
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // D400 SALES ANALYTICS
        // ========================================
        .route(
            "/api/d400/dashboard",
            get(handlers::d400_sales_analytics::get_dashboard),
        )
        .route(
            "/api/d400/range",
            get(handlers::d400_sales_analytics::get_overview),
        )
        // ========================================
        // KPI INDICATORS
        // ========================================
        .route(
            "/api/indicators/kpi",
            get(handlers::indicators::get_kpis),
        )
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_analytics::test_support::worked_example;
    use crate::shared::config::DashboardConfig;
    use crate::shared::data::dataset::Dataset;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        configure_routes(AppState::new(
            Arc::new(Dataset::from_records(worked_example())),
            DashboardConfig::default(),
        ))
    }

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let (status, body) = get(uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_products_page_over_range() {
        let (status, model) =
            get_json("/api/d400/dashboard?page=products&date_from=2011-01-10&date_to=2011-01-10")
                .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model["page"], "products");
        assert_eq!(model["layout"], "columns");
        assert_eq!(model["filtered_rows"], 2);
        assert_eq!(model["applied_range"]["date_to"], "2011-01-10");
        assert_eq!(model["charts"].as_array().unwrap().len(), 2);
        assert_eq!(model["kpis"][0]["display"], "$ 15.00");
    }

    #[tokio::test]
    async fn test_empty_bound_is_full_range() {
        let (status, model) = get_json("/api/d400/dashboard?date_from=2011-01-11&date_to=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(model["page"], "performance");
        assert_eq!(model["filtered_rows"], 3);
        assert!(model["applied_range"].is_null());
    }

    #[tokio::test]
    async fn test_unknown_page_is_rejected() {
        let (status, _) = get("/api/d400/dashboard?page=customers").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_inverted_range_returns_json_error() {
        let (status, body) =
            get_json("/api/d400/dashboard?date_from=2011-02-01&date_to=2011-01-01").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "date_from 2011-02-01 is after date_to 2011-01-01");
    }

    #[tokio::test]
    async fn test_range_and_indicator_routes() {
        let (status, overview) = get_json("/api/d400/range").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(overview["row_count"], 3);
        assert_eq!(overview["min_date"], "2011-01-10");
        assert_eq!(overview["max_date"], "2011-01-11");
        assert_eq!(overview["pages"].as_array().unwrap().len(), 3);

        let (status, catalog) = get_json("/api/indicators/meta").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(catalog["indicators"].as_array().unwrap().len(), 4);

        let (status, kpis) = get_json("/api/indicators/kpi?date_from=&date_to=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(kpis[1]["display"], "2");

        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"ok");
    }
}
