//! Page views: each turns the filtered rows into the chart panels of one
//! dashboard page. Exactly one view runs per request.

use contracts::dashboards::d400_sales_analytics::{ChartPanel, DashboardPage, PageLayout};

use crate::shared::config::DashboardConfig;
use crate::shared::data::dataset::SalesRecord;

pub mod country;
pub mod product;
pub mod time;

pub use country::{country_stats, CountryPerformanceView, CountryStats};
pub use product::{
    favorite_per_country, top_favorites, top_products, CountryFavorite, ProductAnalysisView,
    ProductQuantity,
};
pub use time::{monthly_sales, MonthlySales, TimeAnalysisView};

pub trait PageView: Sync {
    fn page(&self) -> DashboardPage;

    fn layout(&self) -> PageLayout;

    /// Chart panels in display order. Empty input gives panels without points.
    fn build(&self, rows: &[&SalesRecord], settings: &DashboardConfig) -> Vec<ChartPanel>;
}

pub fn view_for(page: DashboardPage) -> &'static dyn PageView {
    match page {
        DashboardPage::Performance => &CountryPerformanceView,
        DashboardPage::Products => &ProductAnalysisView,
        DashboardPage::Time => &TimeAnalysisView,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_page_has_a_view() {
        for page in DashboardPage::ALL {
            assert_eq!(view_for(page).page(), page);
        }
    }
}
