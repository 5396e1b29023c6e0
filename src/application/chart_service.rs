// Chart service - One render pass per chart kind
use crate::application::gap_filler;
use crate::application::multi_series::{self, NormalizedSeries, TimeDomain};
use crate::application::range_bounds::{compute_bounds, compute_context_bounds};
use crate::application::threshold;
use crate::domain::alert::AlertInterval;
use crate::domain::availability::{AvailabilityEvent, AvailabilityInterval};
use crate::domain::bounds::{BoundsOptions, RangeBounds};
use crate::domain::sample::{RawResponsePoint, Sample};
use crate::domain::series::Series;
use crate::infrastructure::config::ChartDefaults;
use crate::infrastructure::response_mapper::map_response;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RenderError {
    #[error("window start {start} is after window end {end}")]
    InvertedWindow { start: i64, end: i64 },
    #[error("alert value must be a finite number, got {0}")]
    NonFiniteAlertValue(f64),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChartRequest {
    pub points: Vec<RawResponsePoint>,
    /// Previous-range or comparison series sharing the y axis.
    #[serde(default)]
    pub overlays: Vec<Vec<RawResponsePoint>>,
    pub force_zero_floor: Option<bool>,
    pub alert_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricChartFrame {
    pub samples: Vec<Sample>,
    pub overlays: Vec<Vec<Sample>>,
    pub bounds: RangeBounds,
    /// Bounds of the overview chart, which pads only the avg extent.
    pub context_bounds: RangeBounds,
    pub alert_intervals: Vec<AlertInterval>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityChartRequest {
    pub events: Vec<AvailabilityEvent>,
    pub window_start: i64,
    pub window_end: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityChartFrame {
    pub intervals: Vec<AvailabilityInterval>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesInput {
    pub key: String,
    pub key_hash: Option<String>,
    pub color: Option<String>,
    pub values: Vec<RawResponsePoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiChartRequest {
    pub series: Vec<SeriesInput>,
    #[serde(default)]
    pub previous_key_hashes: Vec<String>,
    pub force_zero_floor: Option<bool>,
    pub alert_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiChartFrame {
    pub series: Vec<NormalizedSeries>,
    pub retired: Vec<String>,
    pub time_domain: Option<TimeDomain>,
    pub bounds: RangeBounds,
}

#[derive(Clone)]
pub struct ChartService {
    defaults: ChartDefaults,
}

impl ChartService {
    pub fn new(defaults: ChartDefaults) -> Self {
        Self { defaults }
    }

    pub fn render_metric(&self, request: MetricChartRequest) -> Result<MetricChartFrame, RenderError> {
        let opts = self.bounds_options(request.force_zero_floor, request.alert_value)?;

        let samples = map_response(&request.points);
        let overlays: Vec<Vec<Sample>> = request
            .overlays
            .iter()
            .map(|points| map_response(points))
            .collect();

        let all: Vec<&[Sample]> = std::iter::once(samples.as_slice())
            .chain(overlays.iter().map(Vec::as_slice))
            .collect();
        let bounds = compute_bounds(&all, &opts);
        let context_bounds = compute_context_bounds(&samples);

        let alert_intervals = match opts.alert_value {
            Some(alert) => threshold::extract(&samples, alert),
            None => Vec::new(),
        };

        tracing::debug!(
            "Rendered metric chart: {} samples, {} overlays, {} alert intervals",
            samples.len(),
            overlays.len(),
            alert_intervals.len()
        );

        Ok(MetricChartFrame {
            samples,
            overlays,
            bounds,
            context_bounds,
            alert_intervals,
        })
    }

    pub fn render_availability(
        &self,
        request: AvailabilityChartRequest,
    ) -> Result<AvailabilityChartFrame, RenderError> {
        if request.window_start > request.window_end {
            return Err(RenderError::InvertedWindow {
                start: request.window_start,
                end: request.window_end,
            });
        }

        let intervals = gap_filler::fill(&request.events, request.window_start, request.window_end);

        tracing::debug!(
            "Rendered availability chart: {} events -> {} intervals",
            request.events.len(),
            intervals.len()
        );

        Ok(AvailabilityChartFrame { intervals })
    }

    pub fn render_multi(&self, request: MultiChartRequest) -> Result<MultiChartFrame, RenderError> {
        let opts = self.bounds_options(request.force_zero_floor, request.alert_value)?;

        let series: Vec<Series> = request
            .series
            .into_iter()
            .map(|input| Series {
                values: map_response(&input.values),
                key: input.key,
                key_hash: input.key_hash,
                color: input.color,
            })
            .collect();

        let normalized = multi_series::normalize(series, &request.previous_key_hashes);

        let values: Vec<&[Sample]> = normalized
            .series
            .iter()
            .map(|s| s.values.as_slice())
            .collect();
        let bounds = compute_bounds(&values, &opts);

        tracing::debug!(
            "Rendered multi-series chart: {} series, {} retired",
            normalized.series.len(),
            normalized.retired.len()
        );

        Ok(MultiChartFrame {
            series: normalized.series,
            retired: normalized.retired,
            time_domain: normalized.time_domain,
            bounds,
        })
    }

    fn bounds_options(
        &self,
        force_zero_floor: Option<bool>,
        alert_value: Option<f64>,
    ) -> Result<BoundsOptions, RenderError> {
        let alert_value = alert_value.or(self.defaults.alert_value);
        if let Some(alert) = alert_value {
            if !alert.is_finite() {
                return Err(RenderError::NonFiniteAlertValue(alert));
            }
        }

        Ok(BoundsOptions::new(
            force_zero_floor.unwrap_or(self.defaults.force_zero_floor),
            alert_value,
        ))
    }
}
