use contracts::dashboards::d400_sales_analytics::KpiSummary;
use contracts::shared::indicators::*;

use super::metadata::{self, ids};
use crate::shared::format::{format_money, format_number};

/// Reads indicators off a `KpiSummary` and formats them per the catalogue
pub struct IndicatorRegistry {
    catalog: IndicatorCatalogResponse,
}

impl IndicatorRegistry {
    pub fn new(currency: &str) -> Self {
        Self {
            catalog: metadata::build_catalog(currency),
        }
    }

    pub fn catalog(&self) -> &IndicatorCatalogResponse {
        &self.catalog
    }

    /// Compute the requested indicators, in request order. Unknown IDs are
    /// skipped with a warning.
    pub fn compute(&self, ids: &[IndicatorId], summary: &KpiSummary) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            match (indicator_value(id, summary), self.catalog.find(id)) {
                (Some(value), Some(meta)) => {
                    results.push(IndicatorValue {
                        id: id.clone(),
                        label: meta.label.clone(),
                        value,
                        display: format_value(&meta.format, value),
                    });
                }
                _ => tracing::warn!("indicator {} not found in registry", id.0),
            }
        }

        results
    }

    /// Compute every indicator of a set, in the set's display order
    pub fn compute_set(&self, set_id: &IndicatorSetId, summary: &KpiSummary) -> Vec<IndicatorValue> {
        match self.catalog.find_set(set_id) {
            Some(set) => self.compute(&set.indicators, summary),
            None => {
                tracing::warn!("indicator set {} not found in registry", set_id.0);
                Vec::new()
            }
        }
    }
}

fn indicator_value(id: &IndicatorId, summary: &KpiSummary) -> Option<f64> {
    match id.0.as_str() {
        ids::TOTAL_SALES => Some(summary.total_sales),
        ids::TOTAL_ORDERS => Some(summary.total_orders as f64),
        ids::AVG_ORDER_VALUE => Some(summary.avg_order_value),
        ids::TOTAL_PRODUCTS_SOLD => Some(summary.total_products_sold as f64),
        _ => None,
    }
}

fn format_value(format: &ValueFormat, value: f64) -> String {
    match format {
        ValueFormat::Money { currency } => format_money(value, currency),
        ValueFormat::Integer => format_number(value.round() as i64),
    }
}
