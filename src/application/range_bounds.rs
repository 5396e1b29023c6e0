// Y-axis auto-ranging over one or many series
use crate::domain::bounds::{BoundsOptions, RangeBounds};
use crate::domain::sample::Sample;

const LOW_PADDING: f64 = 0.05;
const HIGH_PADDING: f64 = 0.2;
const ALERT_HEADROOM: f64 = 1.2;
const CONTEXT_LOW_PADDING: f64 = 0.05;
const CONTEXT_HIGH_PADDING: f64 = 0.03;

/// Compute a padded `[low, high]` domain across all series.
///
/// Each sample contributes `avg`, falling back to `value`; empty samples and
/// samples without either are skipped. The floor is `min - min * 5%`, signed,
/// so a negative minimum gets pushed *up* toward zero rather than padded
/// downward. The ceiling adds 20% of the value spread above the peak, and is
/// raised to `alert * 1.2` when that is higher so the alert line stays in
/// view. When nothing contributes, or both bounds come out zero, the default
/// `[0, 10]` span is used.
pub fn compute_bounds<S: AsRef<[Sample]>>(series: &[S], opts: &BoundsOptions) -> RangeBounds {
    let extent = series
        .iter()
        .filter_map(|s| series_extent(s.as_ref()))
        .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)));

    let Some((min, peak)) = extent else {
        return RangeBounds::default_span();
    };

    let low = if opts.force_zero_floor {
        0.0
    } else {
        min - min * LOW_PADDING
    };

    let padded_peak = peak + (peak - min) * HIGH_PADDING;
    let high = match opts.alert_value.filter(|a| a.is_finite()) {
        Some(alert) => (alert * ALERT_HEADROOM).max(padded_peak),
        None => padded_peak,
    };

    if low == 0.0 && high == 0.0 {
        return RangeBounds::default_span();
    }

    RangeBounds::new(low, high)
}

/// Bounds for the compact context (overview) chart under the main chart.
///
/// Only bucket averages count. Both edges are padded relative to their own
/// magnitude: `max + max * 3%` and `min - min * 5%`. Falls back to the
/// default span like [`compute_bounds`].
pub fn compute_context_bounds(samples: &[Sample]) -> RangeBounds {
    let extent = samples
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.avg)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        });

    let Some((min, max)) = extent else {
        return RangeBounds::default_span();
    };

    let low = min - min * CONTEXT_LOW_PADDING;
    let high = max + max * CONTEXT_HIGH_PADDING;
    if low == 0.0 && high == 0.0 {
        return RangeBounds::default_span();
    }

    RangeBounds::new(low, high)
}

/// `(min, max)` of the representative values of one series.
fn series_extent(samples: &[Sample]) -> Option<(f64, f64)> {
    samples
        .iter()
        .filter_map(Sample::representative)
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avg_series(values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Sample::aggregate(i as i64 * 1000, *v, *v, *v))
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_single_series_padding() {
        let bounds = compute_bounds(&[avg_series(&[10.0, 20.0, 30.0])], &BoundsOptions::default());
        assert!(close(bounds.low, 9.5));
        assert!(close(bounds.high, 34.0));
    }

    #[test]
    fn test_negative_min_floor_moves_toward_zero() {
        let bounds = compute_bounds(&[avg_series(&[-10.0, 10.0])], &BoundsOptions::default());
        assert!(close(bounds.low, -9.5));
        assert!(close(bounds.high, 14.0));
    }

    #[test]
    fn test_force_zero_floor() {
        let opts = BoundsOptions::new(true, None);
        let bounds = compute_bounds(&[avg_series(&[10.0, 20.0])], &opts);
        assert_eq!(bounds.low, 0.0);
        assert!(close(bounds.high, 22.0));
    }

    #[test]
    fn test_alert_value_raises_high() {
        let opts = BoundsOptions::new(false, Some(100.0));
        let bounds = compute_bounds(&[avg_series(&[10.0, 20.0])], &opts);
        assert!(close(bounds.high, 120.0));

        // A low alert never lowers the data-driven ceiling.
        let opts = BoundsOptions::new(false, Some(1.0));
        let bounds = compute_bounds(&[avg_series(&[10.0, 20.0])], &opts);
        assert!(close(bounds.high, 22.0));
    }

    #[test]
    fn test_alert_monotonicity() {
        let series = [avg_series(&[3.0, 7.0, 5.0])];
        let mut previous = f64::NEG_INFINITY;
        for alert in [-50.0, -1.0, 0.0, 2.0, 6.0, 8.0, 15.0, 400.0] {
            let high = compute_bounds(&series, &BoundsOptions::new(false, Some(alert))).high;
            assert!(high >= previous, "alert {} lowered high", alert);
            previous = high;
        }
    }

    #[test]
    fn test_multi_series_extent() {
        let series = vec![avg_series(&[5.0, 6.0]), avg_series(&[1.0, 2.0]), avg_series(&[9.0])];
        let bounds = compute_bounds(&series, &BoundsOptions::default());
        assert!(close(bounds.low, 0.95));
        assert!(close(bounds.high, 9.0 + 8.0 * 0.2));
    }

    #[test]
    fn test_empty_samples_are_excluded() {
        let mut samples = avg_series(&[4.0, 8.0]);
        samples.push(Sample::empty(5000));
        let bounds = compute_bounds(&[samples], &BoundsOptions::default());
        assert!(close(bounds.low, 3.8));
        assert!(close(bounds.high, 8.8));
    }

    #[test]
    fn test_all_empty_series_uses_default_span() {
        let series = vec![vec![Sample::empty(0), Sample::empty(1000)], vec![]];
        let bounds = compute_bounds(&series, &BoundsOptions::default());
        assert_eq!(bounds, RangeBounds::new(0.0, 10.0));

        let none: [Vec<Sample>; 0] = [];
        assert_eq!(compute_bounds(&none, &BoundsOptions::default()), RangeBounds::default_span());
    }

    #[test]
    fn test_all_zero_series_uses_default_span() {
        let bounds = compute_bounds(&[avg_series(&[0.0, 0.0])], &BoundsOptions::default());
        assert_eq!(bounds, RangeBounds::default_span());
    }

    #[test]
    fn test_context_bounds_pad_each_edge() {
        let bounds = compute_context_bounds(&avg_series(&[20.0, 100.0, 60.0]));
        assert!(close(bounds.low, 19.0));
        assert!(close(bounds.high, 103.0));

        // Unlike the main chart, the ceiling ignores the spread.
        let main = compute_bounds(&[avg_series(&[20.0, 100.0, 60.0])], &BoundsOptions::default());
        assert!(close(main.high, 116.0));
    }

    #[test]
    fn test_context_bounds_ignore_raw_and_empty() {
        let mut samples = avg_series(&[-40.0, -10.0]);
        samples.push(Sample::raw(5000, 500.0));
        samples.push(Sample::empty(6000));
        let bounds = compute_context_bounds(&samples);
        assert!(close(bounds.low, -38.0));
        assert!(close(bounds.high, -10.3));

        let raw_only = vec![Sample::raw(0, 3.0)];
        assert_eq!(compute_context_bounds(&raw_only), RangeBounds::default_span());
        assert_eq!(compute_context_bounds(&avg_series(&[0.0])), RangeBounds::default_span());
    }

    #[test]
    fn test_raw_values_are_used_without_avg() {
        let samples = vec![Sample::raw(0, 2.0), Sample::raw(1000, 12.0)];
        let bounds = compute_bounds(&[samples], &BoundsOptions::new(true, None));
        assert_eq!(bounds.low, 0.0);
        assert!(close(bounds.high, 14.0));
    }
}
