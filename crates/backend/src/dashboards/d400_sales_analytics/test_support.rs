use chrono::{NaiveDate, NaiveDateTime};

use crate::shared::data::dataset::SalesRecord;

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

pub fn record_at(invoice: &str, country: &str, total_price: f64, ts: &str) -> SalesRecord {
    SalesRecord {
        invoice_no: invoice.to_string(),
        description: "ITEM".to_string(),
        quantity: 1,
        unit_price: total_price,
        total_price,
        invoice_date: datetime(ts),
        country: country.to_string(),
    }
}

pub fn product(invoice: &str, country: &str, description: &str, quantity: i64) -> SalesRecord {
    SalesRecord {
        invoice_no: invoice.to_string(),
        description: description.to_string(),
        quantity,
        unit_price: 1.0,
        total_price: quantity as f64,
        invoice_date: datetime("2011-01-10 10:00:00"),
        country: country.to_string(),
    }
}

/// The three rows from the worked example: UK has two lines of one invoice,
/// FR one line of another.
pub fn worked_example() -> Vec<SalesRecord> {
    vec![
        record_at("A1", "UK", 10.0, "2011-01-10 10:00:00"),
        record_at("A1", "UK", 5.0, "2011-01-10 10:00:00"),
        record_at("A2", "FR", 20.0, "2011-01-11 11:00:00"),
    ]
}
