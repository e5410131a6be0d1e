//! The per-segment rule shared by batch and live analysis.
//!
//! A segment is the interval between two consecutive samples. Distance always
//! counts; speed and time only count when the segment has a positive duration.
//! Accelerometer events are classified whenever both ends carry a reading.

use crate::analytics::distance::distance_meters;
use crate::types::metrics::TripMetrics;
use crate::types::sample::GeoSample;

/// Segments at or below this speed count as stopped time.
pub const MOVING_THRESHOLD_KMH: f64 = 2.0;
/// Accel differences strictly below this are hard braking.
pub const HARD_BRAKE_DELTA: f64 = -2.5;
/// Accel differences strictly above this are hard acceleration.
pub const HARD_ACCEL_DELTA: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccelEvent {
    HardBrake,
    HardAccel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub distance_meters: f64,
    /// `None` when the timestamps do not advance.
    pub timing: Option<SegmentTiming>,
    pub accel_event: Option<AccelEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentTiming {
    pub duration_seconds: f64,
    pub speed_kmh: f64,
}

impl SegmentTiming {
    pub fn is_moving(&self) -> bool {
        self.speed_kmh > MOVING_THRESHOLD_KMH
    }
}

impl Segment {
    pub fn between(prev: &GeoSample, curr: &GeoSample) -> Self {
        let distance = distance_meters(prev.latitude, prev.longitude, curr.latitude, curr.longitude);
        // Subtract as floats: feed timestamps are unchecked and may span the i64 range.
        let dt = (curr.timestamp_millis as f64 - prev.timestamp_millis as f64) / 1000.0;

        let timing = (dt > 0.0).then(|| SegmentTiming {
            duration_seconds: dt,
            speed_kmh: (distance / dt) * 3.6,
        });

        let accel_event = match (prev.accel, curr.accel) {
            (Some(before), Some(after)) => classify_accel(after - before),
            _ => None,
        };

        Segment {
            distance_meters: distance,
            timing,
            accel_event,
        }
    }

    pub fn speed_kmh(&self) -> Option<f64> {
        self.timing.map(|t| t.speed_kmh)
    }
}

fn classify_accel(diff: f64) -> Option<AccelEvent> {
    if diff < HARD_BRAKE_DELTA {
        Some(AccelEvent::HardBrake)
    } else if diff > HARD_ACCEL_DELTA {
        Some(AccelEvent::HardAccel)
    } else {
        None
    }
}

/// Running aggregates over a series of segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct SegmentTotals {
    distance_meters: f64,
    speed_sum: f64,
    speed_count: u64,
    max_speed_kmh: f64,
    moving_seconds: f64,
    stopped_seconds: f64,
    hard_brake_count: u32,
    hard_accel_count: u32,
}

impl SegmentTotals {
    pub fn record(&mut self, segment: &Segment) {
        self.distance_meters += segment.distance_meters;

        if let Some(timing) = segment.timing {
            self.speed_sum += timing.speed_kmh;
            self.speed_count += 1;
            self.max_speed_kmh = self.max_speed_kmh.max(timing.speed_kmh);
            if timing.is_moving() {
                self.moving_seconds += timing.duration_seconds;
            } else {
                self.stopped_seconds += timing.duration_seconds;
            }
        }

        match segment.accel_event {
            Some(AccelEvent::HardBrake) => self.hard_brake_count += 1,
            Some(AccelEvent::HardAccel) => self.hard_accel_count += 1,
            None => {}
        }
    }

    pub fn to_metrics(&self) -> TripMetrics {
        let avg_speed_kmh = if self.speed_count > 0 {
            self.speed_sum / self.speed_count as f64
        } else {
            0.0
        };

        TripMetrics {
            total_distance_meters: self.distance_meters,
            max_speed_kmh: self.max_speed_kmh,
            avg_speed_kmh,
            moving_seconds: self.moving_seconds,
            stopped_seconds: self.stopped_seconds,
            hard_brake_count: self.hard_brake_count,
            hard_accel_count: self.hard_accel_count,
            instantaneous_speed_kmh: None,
        }
    }
}
