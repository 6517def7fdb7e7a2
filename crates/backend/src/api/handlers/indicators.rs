use axum::{
    extract::{Query, State},
    Json,
};
use contracts::dashboards::d400_sales_analytics::DateSelection;
use contracts::shared::indicators::*;

use super::d400_sales_analytics::{bad_request, ApiError};
use crate::api::state::AppState;
use crate::dashboards::d400_sales_analytics::service;
use crate::shared::indicators::metadata;

/// GET /api/indicators/kpi?date_from=2011-01-01&date_to=2011-12-31
///
/// The four KPI cards for the given period.
pub async fn get_kpis(
    State(state): State<AppState>,
    Query(selection): Query<DateSelection>,
) -> Result<Json<Vec<IndicatorValue>>, ApiError> {
    tracing::info!(
        "Indicators: computing KPIs for period {:?}..{:?}",
        selection.date_from,
        selection.date_to,
    );

    let values = service::kpi_values(&state.dataset, &selection, &state.settings)
        .map_err(|e| bad_request(e.to_string()))?;

    tracing::info!("Indicators: returning {} values", values.len());
    Ok(Json(values))
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog(State(state): State<AppState>) -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog(&state.settings.currency_symbol))
}
