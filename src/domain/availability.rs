// Availability domain models
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailStatus {
    Up,
    Down,
    Unknown,
}

impl fmt::Display for AvailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AvailStatus::Up => "up",
            AvailStatus::Down => "down",
            AvailStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// An observed state change. The state holds until the next event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityEvent {
    pub timestamp: i64,
    #[serde(rename = "value")]
    pub status: AvailStatus,
}

impl AvailabilityEvent {
    pub fn new(timestamp: i64, status: AvailStatus) -> Self {
        Self { timestamp, status }
    }
}

/// A labeled interval covering `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityInterval {
    pub start: i64,
    pub end: i64,
    #[serde(rename = "value")]
    pub status: AvailStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(rename = "duration")]
    pub duration_label: String,
}

impl AvailabilityInterval {
    pub fn new(start: i64, end: i64, status: AvailStatus) -> Self {
        Self {
            start,
            end,
            status,
            start_date: DateTime::from_timestamp_millis(start).unwrap_or_default(),
            end_date: DateTime::from_timestamp_millis(end).unwrap_or_default(),
            duration_label: humanize_duration(span_delta(start, end)),
        }
    }

    pub fn duration_ms(&self) -> i64 {
        self.end.saturating_sub(self.start)
    }
}

/// `end - start`, clamped to the range `TimeDelta` can represent.
fn span_delta(start: i64, end: i64) -> TimeDelta {
    let ms = end.saturating_sub(start);
    TimeDelta::try_milliseconds(ms).unwrap_or(if ms < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    })
}

/// Relative-time label without suffix, e.g. "an hour" or "3 days".
pub fn humanize_duration(duration: TimeDelta) -> String {
    let seconds = duration.num_milliseconds().abs() as f64 / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;

    if seconds < 45.0 {
        "a few seconds".to_string()
    } else if seconds < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes.round() as i64)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours.round() as i64)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days.round() as i64)
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", (days / 30.4).round() as i64)
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", (days / 365.0).round() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(TimeDelta::milliseconds(4000)), "a few seconds");
        assert_eq!(humanize_duration(TimeDelta::seconds(60)), "a minute");
        assert_eq!(humanize_duration(TimeDelta::minutes(10)), "10 minutes");
        assert_eq!(humanize_duration(TimeDelta::hours(1)), "an hour");
        assert_eq!(humanize_duration(TimeDelta::hours(5)), "5 hours");
        assert_eq!(humanize_duration(TimeDelta::hours(24)), "a day");
        assert_eq!(humanize_duration(TimeDelta::days(3)), "3 days");
        assert_eq!(humanize_duration(TimeDelta::days(30)), "a month");
        assert_eq!(humanize_duration(TimeDelta::days(91)), "3 months");
        assert_eq!(humanize_duration(TimeDelta::days(400)), "a year");
        assert_eq!(humanize_duration(TimeDelta::days(800)), "2 years");
    }

    #[test]
    fn test_interval_dates_and_label() {
        let interval = AvailabilityInterval::new(0, 3_600_000, AvailStatus::Up);
        assert_eq!(interval.duration_ms(), 3_600_000);
        assert_eq!(interval.duration_label, "an hour");
        assert_eq!(interval.start_date.timestamp_millis(), 0);
        assert_eq!(interval.end_date.timestamp_millis(), 3_600_000);
    }

    #[test]
    fn test_interval_spanning_whole_timeline() {
        let interval = AvailabilityInterval::new(i64::MIN, 10, AvailStatus::Unknown);
        assert_eq!(interval.duration_ms(), i64::MAX);
        assert!(interval.duration_label.ends_with("years"));

        let inverted = AvailabilityInterval::new(i64::MAX, i64::MIN, AvailStatus::Up);
        assert_eq!(inverted.duration_ms(), i64::MIN);
        assert!(inverted.duration_label.ends_with("years"));
    }

    #[test]
    fn test_event_wire_shape() {
        let event: AvailabilityEvent =
            serde_json::from_str(r#"{"timestamp":1000,"value":"down"}"#).unwrap();
        assert_eq!(event, AvailabilityEvent::new(1000, AvailStatus::Down));
        assert_eq!(event.status.to_string(), "down");
    }
}
