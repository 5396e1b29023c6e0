// Metric sample domain models
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Canonical chart sample, either a raw value or a bucketed aggregate.
///
/// `empty` marks a bucket with no data, which is plotted as a gap and is
/// distinct from a real zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(rename = "percentile95th", skip_serializing_if = "Option::is_none")]
    pub percentile_95th: Option<f64>,
    pub empty: bool,
}

impl Sample {
    pub fn raw(timestamp: i64, value: f64) -> Self {
        Self {
            timestamp,
            value: Some(value),
            avg: None,
            min: None,
            max: None,
            median: None,
            percentile_95th: None,
            empty: false,
        }
    }

    pub fn aggregate(timestamp: i64, avg: f64, min: f64, max: f64) -> Self {
        Self {
            timestamp,
            value: None,
            avg: Some(avg),
            min: Some(min),
            max: Some(max),
            median: None,
            percentile_95th: None,
            empty: false,
        }
    }

    pub fn empty(timestamp: i64) -> Self {
        Self {
            timestamp,
            value: None,
            avg: None,
            min: None,
            max: None,
            median: None,
            percentile_95th: None,
            empty: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Raw metrics carry `value` instead of the avg/min/max of an aggregate.
    pub fn is_raw(&self) -> bool {
        self.avg.is_none()
    }

    /// Value used for scaling: `avg` when present, otherwise `value`.
    /// Empty samples have none.
    pub fn representative(&self) -> Option<f64> {
        if self.empty {
            return None;
        }
        self.avg.or(self.value)
    }
}

/// Time placement shared by both raw response variants.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointSpan {
    pub timestamp: Option<i64>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub empty: bool,
}

impl PointSpan {
    /// Explicit timestamp, else the bucket midpoint, else whichever bucket
    /// edge is known.
    pub fn resolve_timestamp(&self) -> Option<i64> {
        match (self.timestamp, self.start, self.end) {
            (Some(ts), _, _) => Some(ts),
            (None, Some(start), Some(end)) => Some(midpoint(start, end)),
            (None, Some(start), None) => Some(start),
            (None, None, end) => end,
        }
    }
}

// Widened so buckets spanning most of the i64 range cannot overflow.
fn midpoint(start: i64, end: i64) -> i64 {
    let (start, end) = (i128::from(start), i128::from(end));
    (start + (end - start) / 2) as i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub span: PointSpan,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatePoint {
    pub span: PointSpan,
    pub avg: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub percentile_95th: Option<f64>,
}

/// One point of a metrics API response.
///
/// Bucketed responses carry `avg`; raw responses carry `value`. Numeric
/// fields that are not well-formed numbers deserialize as `None` instead of
/// failing the whole batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "WirePoint")]
pub enum RawResponsePoint {
    Raw(RawPoint),
    Aggregate(AggregatePoint),
}

impl RawResponsePoint {
    pub fn span(&self) -> &PointSpan {
        match self {
            RawResponsePoint::Raw(p) => &p.span,
            RawResponsePoint::Aggregate(p) => &p.span,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePoint {
    #[serde(default, deserialize_with = "lenient_millis")]
    timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient_millis")]
    start: Option<i64>,
    #[serde(default, deserialize_with = "lenient_millis")]
    end: Option<i64>,
    #[serde(default, deserialize_with = "lenient_number")]
    value: Option<f64>,
    // Kept as JSON so presence can be told apart from well-formedness.
    #[serde(default)]
    avg: Option<Value>,
    #[serde(default, deserialize_with = "lenient_number")]
    min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    max: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    median: Option<f64>,
    #[serde(default, rename = "percentile95th", deserialize_with = "lenient_number")]
    percentile_95th: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    empty: bool,
}

impl From<WirePoint> for RawResponsePoint {
    fn from(wire: WirePoint) -> Self {
        let span = PointSpan {
            timestamp: wire.timestamp,
            start: wire.start,
            end: wire.end,
            empty: wire.empty,
        };

        match wire.avg {
            Some(avg) => RawResponsePoint::Aggregate(AggregatePoint {
                span,
                avg: finite(&avg),
                min: wire.min,
                max: wire.max,
                median: wire.median,
                percentile_95th: wire.percentile_95th,
            }),
            None => RawResponsePoint::Raw(RawPoint {
                span,
                value: wire.value,
            }),
        }
    }
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|n| n.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(finite))
}

fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().filter(|n| n.is_finite()).map(|n| n as i64))
    }))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_bool()).unwrap_or(false))
}
