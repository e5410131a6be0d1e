use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::analytics::TripAccumulator;
use crate::error::SampleError;
use crate::types::metrics::TripMetrics;
use crate::types::sample::{GeoSample, RawSample};

/// The open-ended live trip: running metrics plus the route drawn so far.
#[derive(Debug, Clone)]
pub struct LiveSession {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    accumulator: TripAccumulator,
    path: Vec<[f64; 2]>,
}

impl LiveSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            accumulator: TripAccumulator::new(),
            path: Vec::new(),
        }
    }

    /// Starts a fresh session. Nothing from the previous one carries over.
    pub fn reset(&mut self) {
        let previous = self.session_id;
        *self = Self::new();
        tracing::info!("Live session {} replaced by {}", previous, self.session_id);
    }

    pub fn push(&mut self, raw: &RawSample) -> Result<TripMetrics, SampleError> {
        let metrics = self.accumulator.push_raw(raw)?;
        if let Some(sample) = self.accumulator.last_sample() {
            self.path.push(sample.position());
        }
        Ok(metrics)
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn metrics(&self) -> TripMetrics {
        self.accumulator.metrics()
    }

    pub fn position(&self) -> Option<&GeoSample> {
        self.accumulator.last_sample()
    }

    pub fn path(&self) -> &[[f64; 2]] {
        &self.path
    }
}

impl Default for LiveSession {
    fn default() -> Self {
        Self::new()
    }
}
