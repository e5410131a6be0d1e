use serde::{Deserialize, Serialize};

/// Derived statistics for one trip, in meters, km/h and seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TripMetrics {
    pub total_distance_meters: f64,
    pub max_speed_kmh: f64,
    pub avg_speed_kmh: f64,
    pub moving_seconds: f64,
    pub stopped_seconds: f64,
    pub hard_brake_count: u32,
    pub hard_accel_count: u32,
    /// Speed of the latest valid segment. Only populated in live mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instantaneous_speed_kmh: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatCard {
    pub label: String,
    pub value: String,
}
