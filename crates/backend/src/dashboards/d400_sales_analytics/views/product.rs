use contracts::dashboards::d400_sales_analytics::{
    AxisSpec, ChartKind, ChartPanel, ChartPoint, DashboardPage, PageLayout,
};
use std::collections::{BTreeMap, HashSet};

use super::PageView;
use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset::SalesRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuantity {
    pub description: String,
    pub quantity: i64,
}

/// A country's best-selling product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryFavorite {
    pub country: String,
    pub description: String,
    pub quantity: i64,
}

/// Rows without a description are left out of product grouping
fn has_description(row: &SalesRecord) -> bool {
    !row.description.trim().is_empty()
}

/// `top_n` products by units sold, smallest first (horizontal bars draw the
/// last point on top)
pub fn top_products(rows: &[&SalesRecord], top_n: usize) -> Vec<ProductQuantity> {
    let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
    for row in rows.iter().filter(|r| has_description(r)) {
        *totals.entry(row.description.as_str()).or_default() += row.quantity;
    }

    let mut products: Vec<ProductQuantity> = totals
        .into_iter()
        .map(|(description, quantity)| ProductQuantity {
            description: description.to_string(),
            quantity,
        })
        .collect();

    products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    products.truncate(top_n);
    products.sort_by_key(|p| p.quantity);
    products
}

/// One row per country: the product with the most units sold there.
/// Ordered by quantity, largest first; ties go to the product name that
/// sorts first.
pub fn favorite_per_country(rows: &[&SalesRecord]) -> Vec<CountryFavorite> {
    let mut totals: BTreeMap<(&str, &str), i64> = BTreeMap::new();
    for row in rows.iter().filter(|r| has_description(r)) {
        *totals
            .entry((row.country.as_str(), row.description.as_str()))
            .or_default() += row.quantity;
    }

    let mut pairs: Vec<((&str, &str), i64)> = totals.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1));

    let mut seen: HashSet<&str> = HashSet::new();
    pairs
        .into_iter()
        .filter(|((country, _), _)| seen.insert(*country))
        .map(|((country, description), quantity)| CountryFavorite {
            country: country.to_string(),
            description: description.to_string(),
            quantity,
        })
        .collect()
}

/// Global `top_n` of the per-country favorites, smallest first
pub fn top_favorites(rows: &[&SalesRecord], top_n: usize) -> Vec<CountryFavorite> {
    let mut favorites = favorite_per_country(rows);
    favorites.truncate(top_n);
    favorites.sort_by_key(|f| f.quantity);
    favorites
}

/// "Product Analysis" page: top products next to per-country favorites
pub struct ProductAnalysisView;

impl PageView for ProductAnalysisView {
    fn page(&self) -> DashboardPage {
        DashboardPage::Products
    }

    fn layout(&self) -> PageLayout {
        PageLayout::Columns
    }

    fn build(&self, rows: &[&SalesRecord], settings: &DashboardConfig) -> Vec<ChartPanel> {
        let top = ChartPanel {
            id: "top_products".to_string(),
            title: format!("Top {} Best-Selling Products", settings.top_n),
            kind: ChartKind::HorizontalBar,
            category_axis: AxisSpec::new("Description", "Product"),
            measure_axis: AxisSpec::new("Quantity", "Quantity"),
            color_axis: None,
            points: top_products(rows, settings.top_n)
                .into_iter()
                .map(|p| ChartPoint {
                    category: p.description,
                    value: p.quantity as f64,
                    color: None,
                })
                .collect(),
        };

        let favorites = ChartPanel {
            id: "favorite_product_by_country".to_string(),
            title: "Favorite Product by Country".to_string(),
            kind: ChartKind::HorizontalBar,
            category_axis: AxisSpec::new("Description", "Product"),
            measure_axis: AxisSpec::new("Quantity", "Quantity"),
            color_axis: Some(AxisSpec::new("Country", "Country")),
            points: top_favorites(rows, settings.top_n)
                .into_iter()
                .map(|f| ChartPoint {
                    category: f.description,
                    value: f.quantity as f64,
                    color: Some(f.country),
                })
                .collect(),
        };

        vec![top, favorites]
    }
}
