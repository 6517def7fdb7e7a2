use contracts::dashboards::d400_sales_analytics::KpiSummary;
use std::collections::HashSet;

use crate::shared::data::dataset::SalesRecord;

/// Total sales, distinct orders, average order value and units sold
pub fn compute_kpis(rows: &[&SalesRecord]) -> KpiSummary {
    let total_sales: f64 = rows.iter().map(|r| r.total_price).sum();
    let total_products_sold: i64 = rows.iter().map(|r| r.quantity).sum();
    let total_orders = rows
        .iter()
        .map(|r| r.invoice_no.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    let avg_order_value = if total_orders > 0 {
        total_sales / total_orders as f64
    } else {
        0.0
    };

    KpiSummary {
        total_sales,
        total_orders,
        avg_order_value,
        total_products_sold,
    }
}
