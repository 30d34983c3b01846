//! Settlement date range.

use chrono::{NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Date range for a settlement listing.
///
/// An open-ended range ends on the current UTC date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlementRange {
    from_date: NaiveDate,
    to_date: Option<NaiveDate>,
}

impl SettlementRange {
    /// Creates a range starting at `from_date`, ending at `to_date` or today.
    pub fn new(from_date: NaiveDate, to_date: Option<NaiveDate>) -> Self {
        Self { from_date, to_date }
    }

    /// Returns the start date.
    pub fn from_date(&self) -> NaiveDate {
        self.from_date
    }

    /// Returns the end date, substituting `today` when none was given.
    pub fn to_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.to_date.unwrap_or(today)
    }

    /// Renders the `fromDate`/`toDate` query string against a fixed `today`.
    pub fn query_on(&self, today: NaiveDate) -> String {
        format!(
            "fromDate={}&toDate={}",
            self.from_date.format(DATE_FORMAT),
            self.to_date_or(today).format(DATE_FORMAT)
        )
    }

    /// Renders the query string, defaulting the end date to today (UTC).
    pub fn query(&self) -> String {
        self.query_on(Utc::now().date_naive())
    }
}
