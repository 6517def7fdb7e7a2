use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub const TOTAL_SALES: &str = "total_sales";
    pub const TOTAL_ORDERS: &str = "total_orders";
    pub const AVG_ORDER_VALUE: &str = "avg_order_value";
    pub const TOTAL_PRODUCTS_SOLD: &str = "total_products_sold";

    pub fn total_sales() -> IndicatorId {
        IndicatorId::new(TOTAL_SALES)
    }
    pub fn total_orders() -> IndicatorId {
        IndicatorId::new(TOTAL_ORDERS)
    }
    pub fn avg_order_value() -> IndicatorId {
        IndicatorId::new(AVG_ORDER_VALUE)
    }
    pub fn total_products_sold() -> IndicatorId {
        IndicatorId::new(TOTAL_PRODUCTS_SOLD)
    }

    pub fn sales_kpis() -> IndicatorSetId {
        IndicatorSetId::new("sales_kpis")
    }
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog(currency: &str) -> IndicatorCatalogResponse {
    let money = || ValueFormat::Money {
        currency: currency.to_string(),
    };

    let indicators = vec![
        IndicatorMeta {
            id: ids::total_sales(),
            label: "Total Sales".into(),
            short_label: Some("Sales".into()),
            icon: "dollar-sign".into(),
            format: money(),
            description: Some("Sum of line totals in the selected period".into()),
        },
        IndicatorMeta {
            id: ids::total_orders(),
            label: "Total Orders".into(),
            short_label: Some("Orders".into()),
            icon: "orders".into(),
            format: ValueFormat::Integer,
            description: Some("Number of distinct invoices".into()),
        },
        IndicatorMeta {
            id: ids::avg_order_value(),
            label: "Average Order Value".into(),
            short_label: Some("Avg. order".into()),
            icon: "invoices".into(),
            format: money(),
            description: Some("Total sales / total orders, 0 without orders".into()),
        },
        IndicatorMeta {
            id: ids::total_products_sold(),
            label: "Products Sold".into(),
            short_label: Some("Units".into()),
            icon: "package".into(),
            format: ValueFormat::Integer,
            description: Some("Sum of quantities, returns included".into()),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: ids::sales_kpis(),
        label: "Sales KPIs".into(),
        indicators: vec![
            ids::total_sales(),
            ids::total_orders(),
            ids::avg_order_value(),
            ids::total_products_sold(),
        ],
        columns: 4,
    }];

    IndicatorCatalogResponse { indicators, sets }
}
