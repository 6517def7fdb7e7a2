use contracts::dashboards::d400_sales_analytics::{
    AppliedRange, DashboardPage, DashboardRequest, DatasetOverview, DateSelection, PageOption,
    RenderModel,
};
use contracts::shared::indicators::IndicatorValue;

use super::error::DashboardError;
use super::filter::{filter_records, DateRange};
use super::kpi::compute_kpis;
use super::views::view_for;
use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset::Dataset;
use crate::shared::indicators::{metadata::ids, registry::IndicatorRegistry};

const TITLE: &str = "Sales Analysis Dashboard";
const SUBTITLE: &str = "An interactive overview of sales performance.";

/// One interaction: filter by the selected dates, compute the KPIs and the
/// selected page's charts.
pub fn render(
    dataset: &Dataset,
    request: &DashboardRequest,
    settings: &DashboardConfig,
) -> Result<RenderModel, DashboardError> {
    let range = DateRange::from_selection(&request.selection())?;
    let rows = filter_records(dataset.records(), range.as_ref(), settings.end_boundary);

    let summary = compute_kpis(&rows);
    let kpis = IndicatorRegistry::new(&settings.currency_symbol)
        .compute_set(&ids::sales_kpis(), &summary);

    let view = view_for(request.page);
    let charts = view.build(&rows, settings);

    tracing::debug!(
        page = request.page.code(),
        range = ?range,
        rows = rows.len(),
        charts = charts.len(),
        "D400 Dashboard: rendered"
    );

    Ok(RenderModel {
        title: TITLE.to_string(),
        subtitle: SUBTITLE.to_string(),
        page: request.page,
        applied_range: range.map(|r| r.applied()),
        filtered_rows: rows.len(),
        summary,
        kpis,
        layout: view.layout(),
        charts,
    })
}

/// KPI cards only, for the metrics strip
pub fn kpi_values(
    dataset: &Dataset,
    selection: &DateSelection,
    settings: &DashboardConfig,
) -> Result<Vec<IndicatorValue>, DashboardError> {
    let range = DateRange::from_selection(selection)?;
    let rows = filter_records(dataset.records(), range.as_ref(), settings.end_boundary);
    let summary = compute_kpis(&rows);
    Ok(IndicatorRegistry::new(&settings.currency_symbol).compute_set(&ids::sales_kpis(), &summary))
}

/// Date picker bounds and default value, page selector options
pub fn overview(dataset: &Dataset) -> DatasetOverview {
    let default_range = match (dataset.min_date(), dataset.max_date()) {
        (Some(date_from), Some(date_to)) => Some(AppliedRange { date_from, date_to }),
        _ => None,
    };

    DatasetOverview {
        row_count: dataset.len(),
        min_date: dataset.min_date(),
        max_date: dataset.max_date(),
        default_range,
        pages: DashboardPage::ALL
            .iter()
            .map(|page| PageOption {
                page: *page,
                label: page.label().to_string(),
            })
            .collect(),
    }
}
