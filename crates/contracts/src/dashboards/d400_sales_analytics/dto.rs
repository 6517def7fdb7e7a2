use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::indicators::IndicatorValue;

/// Page of the sales analytics dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DashboardPage {
    /// Transactions and sales per country
    #[default]
    #[serde(rename = "performance")]
    Performance,
    /// Best-selling products, overall and per country
    #[serde(rename = "products")]
    Products,
    /// Monthly sales
    #[serde(rename = "time")]
    Time,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 3] = [
        DashboardPage::Performance,
        DashboardPage::Products,
        DashboardPage::Time,
    ];

    /// Code used in query strings (e.g., "products")
    pub fn code(&self) -> &'static str {
        match self {
            DashboardPage::Performance => "performance",
            DashboardPage::Products => "products",
            DashboardPage::Time => "time",
        }
    }

    /// Label shown in the page selector
    pub fn label(&self) -> &'static str {
        match self {
            DashboardPage::Performance => "Sales Performance",
            DashboardPage::Products => "Product Analysis",
            DashboardPage::Time => "Time Analysis",
        }
    }
}

/// Date range picker value. Either bound may be missing while the user is
/// still choosing; the range only applies once both are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateSelection {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_to: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> Self {
        Self { date_from, date_to }
    }

    /// Both bounds, if the selection is complete
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        }
    }
}

/// A cleared date picker sends `date_to=`; an empty value is a missing bound
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<NaiveDate>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Request for the dashboard render model (GET query string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub page: DashboardPage,
}

impl DashboardRequest {
    pub fn selection(&self) -> DateSelection {
        DateSelection::new(self.date_from, self.date_to)
    }
}

/// Inclusive date range that was actually applied to the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedRange {
    /// Start date in format "YYYY-MM-DD"
    pub date_from: NaiveDate,
    /// End date in format "YYYY-MM-DD"
    pub date_to: NaiveDate,
}

/// The four top-level KPIs over the filtered rows
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KpiSummary {
    pub total_sales: f64,
    /// Number of distinct invoices
    pub total_orders: u64,
    /// `total_sales / total_orders`, 0 when there are no orders
    pub avg_order_value: f64,
    pub total_products_sold: i64,
}

/// Container the page's charts are arranged in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageLayout {
    /// One tab per chart
    Tabs,
    /// Charts side by side
    Columns,
    /// A single full-width chart
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    VerticalBar,
    /// Categories on the y axis, largest bar expected last in `points`
    HorizontalBar,
    /// Line with point markers
    Line,
}

/// Role of one column of the chart payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSpec {
    /// Column name in the source data (e.g., "Country")
    pub field: String,
    /// Axis title
    pub label: String,
}

impl AxisSpec {
    pub fn new(field: &str, label: &str) -> Self {
        Self {
            field: field.to_string(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub category: String,
    pub value: f64,
    /// Value of the color-split dimension, if the chart has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// One chart, ready to be drawn. Points are in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPanel {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub category_axis: AxisSpec,
    pub measure_axis: AxisSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_axis: Option<AxisSpec>,
    pub points: Vec<ChartPoint>,
}

/// Everything the UI needs to draw one interaction's result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    pub title: String,
    pub subtitle: String,
    pub page: DashboardPage,
    /// None when the selection was incomplete and no filtering happened
    pub applied_range: Option<AppliedRange>,
    pub filtered_rows: usize,
    pub summary: KpiSummary,
    /// Metric cards, in display order
    pub kpis: Vec<IndicatorValue>,
    pub layout: PageLayout,
    pub charts: Vec<ChartPanel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOption {
    pub page: DashboardPage,
    pub label: String,
}

/// Data for the sidebar: date picker bounds and page selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub row_count: usize,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    /// Initial picker value: the full span of the data
    pub default_range: Option<AppliedRange>,
    pub pages: Vec<PageOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
