use chrono::{NaiveDate, NaiveDateTime, Timelike};
use contracts::dashboards::d400_sales_analytics::{AppliedRange, DateSelection};
use serde::Deserialize;

use super::error::DashboardError;
use crate::shared::data::dataset::SalesRecord;

/// How the end date of a range treats records with a time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndBoundary {
    /// Every record on the end date is included
    #[default]
    EndOfDay,
    /// Only records up to `end 00:00:00` are included
    StartOfDay,
}

/// Inclusive calendar date range, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// None when the selection is incomplete (no filtering in that case)
    pub fn from_selection(selection: &DateSelection) -> Result<Option<Self>, DashboardError> {
        selection
            .bounds()
            .map(|(start, end)| Self::new(start, end))
            .transpose()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, ts: NaiveDateTime, boundary: EndBoundary) -> bool {
        let date = ts.date();
        if date < self.start {
            return false;
        }
        match boundary {
            EndBoundary::EndOfDay => date <= self.end,
            EndBoundary::StartOfDay => {
                date < self.end || (date == self.end && is_midnight(ts))
            }
        }
    }

    pub fn applied(&self) -> AppliedRange {
        AppliedRange {
            date_from: self.start,
            date_to: self.end,
        }
    }
}

fn is_midnight(ts: NaiveDateTime) -> bool {
    ts.num_seconds_from_midnight() == 0 && ts.nanosecond() == 0
}

/// Records inside `range`, in dataset order; all records when `range` is None
pub fn filter_records<'a>(
    records: &'a [SalesRecord],
    range: Option<&DateRange>,
    boundary: EndBoundary,
) -> Vec<&'a SalesRecord> {
    match range {
        Some(range) => records
            .iter()
            .filter(|r| range.contains(r.invoice_date, boundary))
            .collect(),
        None => records.iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d400_sales_analytics::test_support::{date, record_at};

    fn sample() -> Vec<SalesRecord> {
        vec![
            record_at("A1", "UK", 10.0, "2011-01-31 23:59:00"),
            record_at("A2", "UK", 5.0, "2011-02-01 00:00:00"),
            record_at("A3", "FR", 20.0, "2011-02-01 12:30:00"),
            record_at("A4", "FR", 7.0, "2011-02-02 08:00:00"),
            record_at("A5", "DE", 3.0, "2011-03-15 09:00:00"),
        ]
    }

    fn invoices(rows: &[&SalesRecord]) -> Vec<String> {
        rows.iter().map(|r| r.invoice_no.clone()).collect()
    }

    #[test]
    fn test_incomplete_selection_is_identity() {
        let records = sample();
        for selection in [
            DateSelection::new(None, None),
            DateSelection::new(Some(date("2011-02-01")), None),
            DateSelection::new(None, Some(date("2011-02-01"))),
        ] {
            let range = DateRange::from_selection(&selection).unwrap();
            assert!(range.is_none());
            let rows = filter_records(&records, range.as_ref(), EndBoundary::EndOfDay);
            assert_eq!(rows.len(), records.len());
            assert!(rows.iter().zip(&records).all(|(a, b)| std::ptr::eq(*a, b)));
        }
    }

    #[test]
    fn test_end_of_day_includes_whole_end_date() {
        let records = sample();
        let range = DateRange::new(date("2011-02-01"), date("2011-02-01")).unwrap();
        let rows = filter_records(&records, Some(&range), EndBoundary::EndOfDay);
        assert_eq!(invoices(&rows), vec!["A2", "A3"]);
    }

    #[test]
    fn test_start_of_day_stops_at_midnight() {
        let records = sample();
        let range = DateRange::new(date("2011-01-01"), date("2011-02-01")).unwrap();
        let rows = filter_records(&records, Some(&range), EndBoundary::StartOfDay);
        assert_eq!(invoices(&rows), vec!["A1", "A2"]);
    }

    #[test]
    fn test_every_row_within_bounds() {
        let records = sample();
        let range = DateRange::new(date("2011-02-01"), date("2011-03-01")).unwrap();
        for boundary in [EndBoundary::EndOfDay, EndBoundary::StartOfDay] {
            let rows = filter_records(&records, Some(&range), boundary);
            assert!(rows.len() <= records.len());
            for row in rows {
                let day = row.invoice_date.date();
                assert!(range.start() <= day && day <= range.end());
            }
        }
    }

    #[test]
    fn test_range_outside_data_is_empty() {
        let records = sample();
        let range = DateRange::new(date("2012-01-01"), date("2012-12-31")).unwrap();
        assert!(filter_records(&records, Some(&range), EndBoundary::EndOfDay).is_empty());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let selection = DateSelection::new(Some(date("2011-03-01")), Some(date("2011-02-01")));
        assert_eq!(
            DateRange::from_selection(&selection),
            Err(DashboardError::InvertedRange {
                start: date("2011-03-01"),
                end: date("2011-02-01"),
            })
        );
    }
}
