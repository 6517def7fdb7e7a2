use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use contracts::dashboards::d400_sales_analytics::{
    DashboardRequest, DatasetOverview, ErrorResponse, RenderModel,
};

use crate::api::state::AppState;
use crate::dashboards::d400_sales_analytics::service;

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn bad_request(message: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: message }))
}

/// GET /api/d400/dashboard?date_from=2011-01-01&date_to=2011-03-31&page=products
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(request): Query<DashboardRequest>,
) -> Result<Json<RenderModel>, ApiError> {
    tracing::info!(
        "D400 Dashboard: page={} range={:?}..{:?}",
        request.page.code(),
        request.date_from,
        request.date_to
    );

    match service::render(&state.dataset, &request, &state.settings) {
        Ok(model) => {
            tracing::info!(
                "D400 Dashboard: Returning {} charts over {} rows",
                model.charts.len(),
                model.filtered_rows
            );
            Ok(Json(model))
        }
        Err(e) => {
            tracing::warn!("D400 Dashboard: Rejected request: {}", e);
            Err(bad_request(e.to_string()))
        }
    }
}

/// GET /api/d400/range
pub async fn get_overview(State(state): State<AppState>) -> Json<DatasetOverview> {
    Json(service::overview(&state.dataset))
}
