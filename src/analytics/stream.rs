use crate::analytics::segment::{Segment, SegmentTotals};
use crate::error::SampleError;
use crate::types::metrics::TripMetrics;
use crate::types::sample::{GeoSample, RawSample};

/// Incremental trip metrics for a live feed.
///
/// One accumulator belongs to one session; callers serialize `push` calls.
#[derive(Debug, Clone, Default)]
pub struct TripAccumulator {
    last: Option<GeoSample>,
    totals: SegmentTotals,
    instantaneous_speed_kmh: Option<f64>,
}

impl TripAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Folds one sample into the running metrics and returns them.
    ///
    /// The first sample after a reset only becomes the reference point.
    pub fn push(&mut self, sample: GeoSample) -> TripMetrics {
        if let Some(last) = self.last.replace(sample) {
            let segment = Segment::between(&last, &sample);
            self.totals.record(&segment);
            if let Some(speed) = segment.speed_kmh() {
                self.instantaneous_speed_kmh = Some(speed);
            }
        }
        self.metrics()
    }

    /// Like [`push`](Self::push), for samples straight off the feed.
    ///
    /// A sample without both coordinates or a timestamp is rejected and the
    /// accumulator is left untouched.
    pub fn push_raw(&mut self, raw: &RawSample) -> Result<TripMetrics, SampleError> {
        let sample = GeoSample::try_from(raw)?;
        Ok(self.push(sample))
    }

    pub fn metrics(&self) -> TripMetrics {
        TripMetrics {
            instantaneous_speed_kmh: self.instantaneous_speed_kmh,
            ..self.totals.to_metrics()
        }
    }

    pub fn last_sample(&self) -> Option<&GeoSample> {
        self.last.as_ref()
    }
}
