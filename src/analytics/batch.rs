use crate::analytics::segment::{Segment, SegmentTotals};
use crate::types::metrics::TripMetrics;
use crate::types::sample::GeoSample;

/// Computes trip metrics over a complete, time-ordered sequence.
///
/// Fewer than two samples yield zeroed metrics. Segments whose timestamps do
/// not advance still add distance but are left out of speed and time.
pub fn analyze(samples: &[GeoSample]) -> TripMetrics {
    if samples.len() < 2 {
        return TripMetrics::default();
    }

    let mut totals = SegmentTotals::default();
    for pair in samples.windows(2) {
        totals.record(&Segment::between(&pair[0], &pair[1]));
    }

    totals.to_metrics()
}
