use crate::error::AuditorError;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

/// Inclusive reporting window, spanning whole days.
#[derive(Debug, PartialEq)]
pub struct TimeRange {
    pub start: chrono::DateTime<Utc>,
    pub end: chrono::DateTime<Utc>,
}

impl TimeRange {
    /// Builds the window from `YYYY-MM-DD` date strings: midnight at the
    /// start of the first day through the last second of the last day.
    pub fn parse(start: &str, end: &str) -> Result<TimeRange, AuditorError> {
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d")?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d")?;
        Self::from_dates(start, end)
    }

    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<TimeRange, AuditorError> {
        let start = start.and_hms_opt(0, 0, 0).ok_or(AuditorError::NoneValue)?;
        let end = end.and_hms_opt(23, 59, 59).ok_or(AuditorError::NoneValue)?;
        Ok(TimeRange {
            start: Utc.from_utc_datetime(&start),
            end: Utc.from_utc_datetime(&end),
        })
    }

    pub fn start_timestamp(&self) -> String {
        Self::format(&self.start)
    }

    pub fn end_timestamp(&self) -> String {
        Self::format(&self.end)
    }

    fn format(date_time: &DateTime<Utc>) -> String {
        date_time.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}
