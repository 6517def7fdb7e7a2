use contracts::dashboards::d400_sales_analytics::{
    AxisSpec, ChartKind, ChartPanel, ChartPoint, DashboardPage, PageLayout,
};
use std::collections::{BTreeMap, HashSet};

use super::PageView;
use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset::SalesRecord;

#[derive(Debug, Clone, PartialEq)]
pub struct CountryStats {
    pub country: String,
    /// Distinct invoices
    pub total_transactions: u64,
    pub total_sales: f64,
}

/// Per-country transactions and sales, best-selling `top_n` countries first
pub fn country_stats(rows: &[&SalesRecord], top_n: usize) -> Vec<CountryStats> {
    let mut groups: BTreeMap<&str, (HashSet<&str>, f64)> = BTreeMap::new();
    for row in rows {
        let (invoices, sales) = groups.entry(row.country.as_str()).or_default();
        invoices.insert(row.invoice_no.as_str());
        *sales += row.total_price;
    }

    let mut stats: Vec<CountryStats> = groups
        .into_iter()
        .map(|(country, (invoices, total_sales))| CountryStats {
            country: country.to_string(),
            total_transactions: invoices.len() as u64,
            total_sales,
        })
        .collect();

    // stable: equal sales keep country name order
    stats.sort_by(|a, b| b.total_sales.total_cmp(&a.total_sales));
    stats.truncate(top_n);
    stats
}

/// "Sales Performance" page: two tabs over the same country table
pub struct CountryPerformanceView;

impl PageView for CountryPerformanceView {
    fn page(&self) -> DashboardPage {
        DashboardPage::Performance
    }

    fn layout(&self) -> PageLayout {
        PageLayout::Tabs
    }

    fn build(&self, rows: &[&SalesRecord], settings: &DashboardConfig) -> Vec<ChartPanel> {
        let stats = country_stats(rows, settings.top_n);

        let transactions = ChartPanel {
            id: "transactions_by_country".to_string(),
            title: "Total Transactions by Country".to_string(),
            kind: ChartKind::VerticalBar,
            category_axis: AxisSpec::new("Country", "Country"),
            measure_axis: AxisSpec::new("Total_Transactions", "Total Transactions"),
            color_axis: None,
            points: stats
                .iter()
                .map(|s| ChartPoint {
                    category: s.country.clone(),
                    value: s.total_transactions as f64,
                    color: None,
                })
                .collect(),
        };

        let sales = ChartPanel {
            id: "sales_by_country".to_string(),
            title: "Total Sales by Country".to_string(),
            kind: ChartKind::VerticalBar,
            category_axis: AxisSpec::new("Country", "Country"),
            measure_axis: AxisSpec::new("Total_Sales", "Total Sales"),
            color_axis: None,
            points: stats
                .into_iter()
                .map(|s| ChartPoint {
                    category: s.country,
                    value: s.total_sales,
                    color: None,
                })
                .collect(),
        };

        vec![transactions, sales]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_analytics::test_support::{record_at, worked_example};

    #[test]
    fn test_worked_example_fr_first() {
        let records = worked_example();
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let stats = country_stats(&rows, 10);
        assert_eq!(
            stats,
            vec![
                CountryStats {
                    country: "FR".into(),
                    total_transactions: 1,
                    total_sales: 20.0,
                },
                CountryStats {
                    country: "UK".into(),
                    total_transactions: 1,
                    total_sales: 15.0,
                },
            ]
        );
    }

    #[test]
    fn test_top_n_sorted_and_unique() {
        let records: Vec<SalesRecord> = (0..15)
            .flat_map(|i| {
                let country = format!("C{i:02}");
                vec![
                    record_at(&format!("X{i}"), &country, i as f64, "2011-01-01 10:00:00"),
                    record_at(&format!("Y{i}"), &country, 1.0, "2011-01-02 10:00:00"),
                ]
            })
            .collect();
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let stats = country_stats(&rows, 10);
        assert_eq!(stats.len(), 10);
        assert!(stats.windows(2).all(|w| w[0].total_sales >= w[1].total_sales));
        let unique: HashSet<&str> = stats.iter().map(|s| s.country.as_str()).collect();
        assert_eq!(unique.len(), stats.len());
        assert_eq!(stats[0].country, "C14");
        assert_eq!(stats[0].total_transactions, 2);
        assert_eq!(stats[0].total_sales, 15.0);
    }

    #[test]
    fn test_ties_keep_name_order() {
        let records = vec![
            record_at("A", "Spain", 5.0, "2011-01-01 10:00:00"),
            record_at("B", "Austria", 5.0, "2011-01-01 10:00:00"),
            record_at("C", "Norway", 9.0, "2011-01-01 10:00:00"),
        ];
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let countries: Vec<String> = country_stats(&rows, 10)
            .into_iter()
            .map(|s| s.country)
            .collect();
        assert_eq!(countries, vec!["Norway", "Austria", "Spain"]);
    }

    #[test]
    fn test_panels_share_the_same_countries() {
        let records = worked_example();
        let rows: Vec<&SalesRecord> = records.iter().collect();

        let panels = CountryPerformanceView.build(&rows, &DashboardConfig::default());
        assert_eq!(panels.len(), 2);
        let categories = |p: &ChartPanel| -> Vec<String> {
            p.points.iter().map(|pt| pt.category.clone()).collect()
        };
        assert_eq!(categories(&panels[0]), categories(&panels[1]));
        assert_eq!(panels[0].points[0].value, 1.0);
        assert_eq!(panels[1].points[0].value, 20.0);
    }

    #[test]
    fn test_empty_rows_give_empty_panels() {
        let panels = CountryPerformanceView.build(&[], &DashboardConfig::default());
        assert_eq!(panels.len(), 2);
        assert!(panels.iter().all(|p| p.points.is_empty()));
    }
}
