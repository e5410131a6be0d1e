use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SampleError;

/// One validated position reading. Timestamps are epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp_millis: i64,
    pub accel: Option<f64>,
}

impl GeoSample {
    pub fn new(latitude: f64, longitude: f64, timestamp_millis: i64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp_millis,
            accel: None,
        }
    }

    pub fn with_accel(mut self, accel: f64) -> Self {
        self.accel = Some(accel);
        self
    }

    pub fn position(&self) -> [f64; 2] {
        [self.latitude, self.longitude]
    }
}

/// A sample as the realtime feed emits it. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSample {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub timestamp: Option<i64>,
    pub accel: Option<f64>,
}

impl RawSample {
    /// Reads a feed entry field by field. A field with the wrong type is
    /// treated as absent, and anything but an object yields an empty sample.
    /// Float timestamps such as `1.7e12` are truncated to whole milliseconds.
    pub fn from_json(value: &Value) -> Self {
        let number = |key: &str| value.get(key).and_then(Value::as_f64).filter(|v| v.is_finite());

        let timestamp = value.get("timestamp").and_then(|ts| {
            ts.as_i64()
                .or_else(|| ts.as_f64().filter(|v| v.is_finite()).map(|v| v as i64))
        });

        RawSample {
            lat: number("lat"),
            lng: number("lng"),
            timestamp,
            accel: number("accel"),
        }
    }
}

impl TryFrom<&RawSample> for GeoSample {
    type Error = SampleError;

    fn try_from(raw: &RawSample) -> Result<Self, Self::Error> {
        let latitude = raw
            .lat
            .filter(|v| v.is_finite())
            .ok_or(SampleError::MissingCoordinate("lat"))?;
        let longitude = raw
            .lng
            .filter(|v| v.is_finite())
            .ok_or(SampleError::MissingCoordinate("lng"))?;
        let timestamp_millis = raw.timestamp.ok_or(SampleError::MissingTimestamp)?;

        Ok(GeoSample {
            latitude,
            longitude,
            timestamp_millis,
            accel: raw.accel.filter(|v| v.is_finite()),
        })
    }
}

/// A batch of raw samples, either as a plain array or keyed by feed ids.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SamplePayload {
    List(Vec<Value>),
    Keyed(Map<String, Value>),
}

impl SamplePayload {
    /// Flattens the payload into arrival order.
    ///
    /// Keyed objects follow the feed client's enumeration order: integer keys
    /// ascending first, then every other key in document order. Malformed
    /// entries stay in place as empty or partial samples so they count as
    /// rejected rather than failing the batch.
    pub fn into_ordered(self) -> Vec<RawSample> {
        match self {
            SamplePayload::List(entries) => entries.iter().map(RawSample::from_json).collect(),
            SamplePayload::Keyed(map) => {
                let mut indexed = Vec::new();
                let mut named = Vec::new();
                for (key, value) in map {
                    let sample = RawSample::from_json(&value);
                    match key.parse::<u32>() {
                        Ok(index) if index.to_string() == key => indexed.push((index, sample)),
                        _ => named.push(sample),
                    }
                }
                indexed.sort_by_key(|(index, _)| *index);
                indexed
                    .into_iter()
                    .map(|(_, sample)| sample)
                    .chain(named)
                    .collect()
            }
        }
    }
}

/// Converts raw samples, dropping the ones that cannot form a `GeoSample`.
/// Returns the accepted sequence and the number of rejected entries.
pub fn collect_valid(raw: &[RawSample]) -> (Vec<GeoSample>, usize) {
    let mut samples = Vec::with_capacity(raw.len());
    let mut rejected = 0;
    for entry in raw {
        match GeoSample::try_from(entry) {
            Ok(sample) => samples.push(sample),
            Err(e) => {
                tracing::debug!("Skipping sample: {}", e);
                rejected += 1;
            }
        }
    }
    (samples, rejected)
}
