use chrono::Datelike;
use contracts::dashboards::d400_sales_analytics::{
    AxisSpec, ChartKind, ChartPanel, ChartPoint, DashboardPage, PageLayout,
};
use std::collections::BTreeMap;

use super::PageView;
use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset::SalesRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySales {
    /// "YYYY-MM"
    pub month: String,
    pub total_sales: f64,
}

/// Sales per calendar month, oldest first. Months without sales are skipped.
pub fn monthly_sales(rows: &[&SalesRecord]) -> Vec<MonthlySales> {
    let mut totals: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for row in rows {
        let key = (row.invoice_date.year(), row.invoice_date.month());
        *totals.entry(key).or_default() += row.total_price;
    }

    totals
        .into_iter()
        .map(|((year, month), total_sales)| MonthlySales {
            month: format!("{:04}-{:02}", year, month),
            total_sales,
        })
        .collect()
}

/// "Time Analysis" page: one line chart
pub struct TimeAnalysisView;

impl PageView for TimeAnalysisView {
    fn page(&self) -> DashboardPage {
        DashboardPage::Time
    }

    fn layout(&self) -> PageLayout {
        PageLayout::Single
    }

    fn build(&self, rows: &[&SalesRecord], _settings: &DashboardConfig) -> Vec<ChartPanel> {
        vec![ChartPanel {
            id: "monthly_sales".to_string(),
            title: "Monthly Sales".to_string(),
            kind: ChartKind::Line,
            category_axis: AxisSpec::new("InvoiceMonth", "Month"),
            measure_axis: AxisSpec::new("TotalPrice", "Total Sales"),
            color_axis: None,
            points: monthly_sales(rows)
                .into_iter()
                .map(|m| ChartPoint {
                    category: m.month,
                    value: m.total_sales,
                    color: None,
                })
                .collect(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_analytics::kpi::compute_kpis;
    use crate::dashboards::d400_sales_analytics::test_support::record_at;

    fn sample() -> Vec<SalesRecord> {
        vec![
            record_at("A1", "UK", 12.25, "2011-02-03 10:00:00"),
            record_at("A2", "UK", 0.5, "2010-12-01 08:26:00"),
            record_at("A3", "FR", 100.0, "2011-02-28 23:59:59"),
            record_at("A4", "FR", 7.75, "2011-10-09 09:00:00"),
            record_at("A5", "DE", 30.0, "2010-12-24 12:00:00"),
        ]
    }

    #[test]
    fn test_months_in_calendar_order() {
        let records = sample();
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let months: Vec<String> = monthly_sales(&rows).into_iter().map(|m| m.month).collect();
        assert_eq!(months, vec!["2010-12", "2011-02", "2011-10"]);
    }

    #[test]
    fn test_monthly_totals_add_up_to_total_sales() {
        let records = sample();
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let monthly = monthly_sales(&rows);
        let sum: f64 = monthly.iter().map(|m| m.total_sales).sum();
        let total = compute_kpis(&rows).total_sales;
        assert!((sum - total).abs() < 1e-9);
        assert_eq!(monthly[0].total_sales, 30.5);
        assert_eq!(monthly[1].total_sales, 112.25);
    }

    #[test]
    fn test_line_panel() {
        let records = sample();
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let panels = TimeAnalysisView.build(&rows, &DashboardConfig::default());
        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].kind, ChartKind::Line);
        assert_eq!(panels[0].points.len(), 3);
        assert!(TimeAnalysisView.build(&[], &DashboardConfig::default())[0]
            .points
            .is_empty());
    }
}
