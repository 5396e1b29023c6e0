// Mapper from metrics API response points to chart samples
use crate::domain::sample::{AggregatePoint, RawPoint, RawResponsePoint, Sample};

/// Convert a raw or bucketed response into chart samples.
///
/// Points with no explicit timestamp are placed at their bucket midpoint.
/// Points that cannot be placed in time at all are dropped.
pub fn map_response(raw: &[RawResponsePoint]) -> Vec<Sample> {
    let samples: Vec<Sample> = raw.iter().filter_map(map_point).collect();

    if samples.len() < raw.len() {
        tracing::debug!(
            "Dropped {} response points without a timestamp or bucket bounds",
            raw.len() - samples.len()
        );
    }

    samples
}

fn map_point(point: &RawResponsePoint) -> Option<Sample> {
    let timestamp = point.span().resolve_timestamp()?;
    let sample = match point {
        RawResponsePoint::Raw(raw) => raw_to_sample(raw, timestamp),
        RawResponsePoint::Aggregate(agg) => aggregate_to_sample(agg, timestamp),
    };
    Some(sample)
}

fn raw_to_sample(point: &RawPoint, timestamp: i64) -> Sample {
    Sample {
        timestamp,
        value: point.value,
        avg: None,
        min: None,
        max: None,
        median: None,
        percentile_95th: None,
        empty: point.span.empty,
    }
}

fn aggregate_to_sample(point: &AggregatePoint, timestamp: i64) -> Sample {
    let empty = point.span.empty;
    Sample {
        timestamp,
        value: None,
        avg: if empty { None } else { point.avg },
        min: point.min,
        max: point.max,
        median: point.median,
        percentile_95th: point.percentile_95th,
        empty,
    }
}
