use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("date_from {start} is after date_to {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}
