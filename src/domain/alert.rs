// Alert band domain model
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A maximal span `[start, end)` during which a series average stayed above
/// `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertInterval {
    pub start: i64,
    pub end: i64,
    pub threshold: f64,
}

impl AlertInterval {
    pub fn new(start: i64, end: i64, threshold: f64) -> Self {
        Self {
            start,
            end,
            threshold,
        }
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.start).unwrap_or_default()
    }

    pub fn end_date(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.end).unwrap_or_default()
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        timestamp >= self.start && timestamp < self.end
    }
}
