// Multi-series normalization - stable identity across renders
use crate::domain::sample::Sample;
use crate::domain::series::{Series, key_hash, palette_color};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesState {
    /// Not part of the previous render.
    Added,
    /// Already drawn by the previous render; update in place.
    Retained,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeries {
    pub key: String,
    pub key_hash: String,
    pub color: String,
    pub state: SeriesState,
    pub values: Vec<Sample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeDomain {
    pub start: i64,
    pub end: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeriesSet {
    pub series: Vec<NormalizedSeries>,
    /// Key hashes drawn previously that are absent from this render.
    pub retired: Vec<String>,
    pub time_domain: Option<TimeDomain>,
}

/// Assign identity and color to each series and diff it against the key
/// hashes of the previous render.
///
/// A preset `key_hash` is kept; otherwise it is derived from `key`. Series
/// without a color get a palette color chosen by key, so it does not shift
/// when other series come and go. Each series' samples are ordered by
/// timestamp and the shared time domain spans all of them.
pub fn normalize(series: Vec<Series>, previous_key_hashes: &[String]) -> NormalizedSeriesSet {
    let previous: HashSet<&str> = previous_key_hashes.iter().map(String::as_str).collect();

    let normalized: Vec<NormalizedSeries> = series
        .into_iter()
        .map(|s| {
            let hash = s.key_hash.unwrap_or_else(|| key_hash(&s.key));
            let color = s
                .color
                .unwrap_or_else(|| palette_color(&s.key).to_string());
            let state = if previous.contains(hash.as_str()) {
                SeriesState::Retained
            } else {
                SeriesState::Added
            };

            let mut values = s.values;
            values.sort_by_key(|sample| sample.timestamp);

            NormalizedSeries {
                key: s.key,
                key_hash: hash,
                color,
                state,
                values,
            }
        })
        .collect();

    let current: HashSet<&str> = normalized.iter().map(|s| s.key_hash.as_str()).collect();
    let mut seen = HashSet::new();
    let retired: Vec<String> = previous_key_hashes
        .iter()
        .filter(|hash| !current.contains(hash.as_str()))
        .filter(|hash| seen.insert(hash.as_str()))
        .cloned()
        .collect();

    if !retired.is_empty() {
        tracing::debug!("Retiring {} series no longer present", retired.len());
    }

    let time_domain = shared_time_domain(&normalized);

    NormalizedSeriesSet {
        series: normalized,
        retired,
        time_domain,
    }
}

fn shared_time_domain(series: &[NormalizedSeries]) -> Option<TimeDomain> {
    series
        .iter()
        .flat_map(|s| s.values.iter().map(|v| v.timestamp))
        .fold(None, |acc, ts| match acc {
            None => Some(TimeDomain { start: ts, end: ts }),
            Some(d) => Some(TimeDomain {
                start: d.start.min(ts),
                end: d.end.max(ts),
            }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(key: &str, timestamps: &[i64]) -> Series {
        let values = timestamps.iter().map(|ts| Sample::raw(*ts, 1.0)).collect();
        Series::new(key.to_string(), None, values)
    }

    #[test]
    fn test_key_hash_is_deterministic() {
        let first = normalize(vec![series("cpu", &[0])], &[]);
        let second = normalize(vec![series("cpu", &[5000])], &[]);
        assert_eq!(first.series[0].key_hash, second.series[0].key_hash);
        assert_eq!(first.series[0].key_hash, key_hash("cpu"));
        assert_eq!(first.series[0].color, second.series[0].color);
    }

    #[test]
    fn test_preset_hash_and_color_are_kept() {
        let mut s = series("cpu", &[0]);
        s.key_hash = Some("custom".to_string());
        s.color = Some("#000000".to_string());
        let result = normalize(vec![s], &[]);
        assert_eq!(result.series[0].key_hash, "custom");
        assert_eq!(result.series[0].color, "#000000");
    }

    #[test]
    fn test_added_retained_and_retired() {
        let previous = vec![key_hash("cpu"), key_hash("disk"), key_hash("disk")];
        let result = normalize(vec![series("cpu", &[0]), series("mem", &[0])], &previous);

        assert_eq!(result.series[0].state, SeriesState::Retained);
        assert_eq!(result.series[1].state, SeriesState::Added);
        assert_eq!(result.retired, vec![key_hash("disk")]);
    }

    #[test]
    fn test_shared_time_domain() {
        let result = normalize(
            vec![series("a", &[3000, 1000]), series("b", &[500, 7000]), series("c", &[])],
            &[],
        );
        assert_eq!(result.time_domain, Some(TimeDomain { start: 500, end: 7000 }));
        let a: Vec<i64> = result.series[0].values.iter().map(|v| v.timestamp).collect();
        assert_eq!(a, vec![1000, 3000]);
    }

    #[test]
    fn test_empty_input() {
        let previous = vec![key_hash("cpu")];
        let result = normalize(Vec::new(), &previous);
        assert!(result.series.is_empty());
        assert_eq!(result.retired, previous);
        assert_eq!(result.time_domain, None);
    }
}
