// Threshold crossing extraction for alert bands
use crate::domain::alert::AlertInterval;
use crate::domain::sample::Sample;

/// Extract the maximal runs of samples whose `avg` exceeds `threshold`.
///
/// A run starts at the first exceeding sample after a sample that did not
/// exceed (or had no `avg`). It ends at the timestamp of the first following
/// sample at or below the threshold. When the run is cut by a sample with no
/// `avg`, it ends at its own last exceeding sample, since nothing is known
/// about the gap. A run still open at the end of the series closes at the
/// final sample's timestamp.
pub fn extract(series: &[Sample], threshold: f64) -> Vec<AlertInterval> {
    let mut intervals = Vec::new();
    let mut run: Option<(i64, i64)> = None;

    for sample in series {
        let exceeds = sample_avg(sample).is_some_and(|avg| avg > threshold);

        match (run, exceeds) {
            (None, true) => run = Some((sample.timestamp, sample.timestamp)),
            (Some((start, _)), true) => run = Some((start, sample.timestamp)),
            (Some((start, last)), false) => {
                let end = if sample_avg(sample).is_some() {
                    sample.timestamp
                } else {
                    last
                };
                intervals.push(AlertInterval::new(start, end, threshold));
                run = None;
            }
            (None, false) => {}
        }
    }

    if let (Some((start, _)), Some(last)) = (run, series.last()) {
        intervals.push(AlertInterval::new(start, last.timestamp, threshold));
    }

    intervals
}

fn sample_avg(sample: &Sample) -> Option<f64> {
    if sample.empty { None } else { sample.avg }
}
