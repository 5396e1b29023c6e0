// Availability gap filling - sparse state changes to contiguous intervals
use crate::domain::availability::{AvailStatus, AvailabilityEvent, AvailabilityInterval};

/// Lookback used when only a single event is known.
pub const SINGLE_EVENT_LOOKBACK_MS: i64 = 60 * 60 * 1000;

/// Build the labeled intervals covering `[window_start, window_end]`.
///
/// - Events after `window_end` are dropped.
/// - A single event yields `[window_end - 1h, t)` unknown followed by
///   `[t, window_end)` with the event's status; either part is omitted when
///   it would be empty.
/// - Otherwise intervals are built backward from `window_end`; the walk stops
///   at the first event at or before `window_start`, which is clamped to it.
///   If every event is later than `window_start`, the leading gap is
///   reported as unknown.
///
/// Intervals are returned in ascending time order. Zero-length intervals
/// (events sharing a timestamp) are not emitted.
pub fn fill(
    events: &[AvailabilityEvent],
    window_start: i64,
    window_end: i64,
) -> Vec<AvailabilityInterval> {
    debug_assert!(
        window_start <= window_end,
        "availability window is inverted"
    );

    let mut sorted: Vec<AvailabilityEvent> = events
        .iter()
        .copied()
        .filter(|e| e.timestamp <= window_end)
        .collect();

    let dropped = events.len() - sorted.len();
    if dropped > 0 {
        tracing::debug!(
            "Dropped {} availability events after window end {}",
            dropped,
            window_end
        );
    }

    // Stable, so events sharing a timestamp keep their input order.
    sorted.sort_by_key(|e| e.timestamp);

    match sorted.as_slice() {
        [] => Vec::new(),
        [only] => fill_single(only, window_end),
        _ => fill_backward(&sorted, window_start, window_end),
    }
}

fn fill_single(event: &AvailabilityEvent, window_end: i64) -> Vec<AvailabilityInterval> {
    let lookback_start = window_end.saturating_sub(SINGLE_EVENT_LOOKBACK_MS);
    let mut intervals = Vec::with_capacity(2);

    if lookback_start < event.timestamp {
        intervals.push(AvailabilityInterval::new(
            lookback_start,
            event.timestamp,
            AvailStatus::Unknown,
        ));
    }
    if event.timestamp < window_end {
        intervals.push(AvailabilityInterval::new(
            event.timestamp,
            window_end,
            event.status,
        ));
    }

    intervals
}

fn fill_backward(
    sorted: &[AvailabilityEvent],
    window_start: i64,
    window_end: i64,
) -> Vec<AvailabilityInterval> {
    let mut intervals = Vec::with_capacity(sorted.len() + 1);
    let mut running_end = window_end;
    let mut reached_start = false;

    for event in sorted.iter().rev() {
        if event.timestamp <= window_start {
            if window_start < running_end {
                intervals.push(AvailabilityInterval::new(
                    window_start,
                    running_end,
                    event.status,
                ));
            }
            reached_start = true;
            break;
        }

        if event.timestamp < running_end {
            intervals.push(AvailabilityInterval::new(
                event.timestamp,
                running_end,
                event.status,
            ));
        }
        running_end = event.timestamp;
    }

    if !reached_start && window_start < running_end {
        intervals.push(AvailabilityInterval::new(
            window_start,
            running_end,
            AvailStatus::Unknown,
        ));
    }

    intervals.reverse();
    intervals
}
