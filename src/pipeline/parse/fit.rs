use crate::error::ParseError;
use crate::pipeline::parse::Parser;
use crate::types::sample::GeoSample;
use fitparser::profile::MesgNum;
use fitparser::Value;

pub struct FitParser;

impl Parser for FitParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<GeoSample>, ParseError> {
        let data = fitparser::from_bytes(bytes)
            .map_err(|e| ParseError::InvalidFit(format!("Failed to parse FIT file: {}", e)))?;

        let samples: Vec<GeoSample> = data
            .iter()
            .filter(|record| record.kind() == MesgNum::Record)
            .filter_map(|record| {
                record_to_sample(record.fields().iter().map(|f| (f.name(), f.value())))
            })
            .collect();

        if samples.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        Ok(samples)
    }
}

/// Builds a sample from one `record` message. Needs a position and a timestamp.
fn record_to_sample<'a>(fields: impl IntoIterator<Item = (&'a str, &'a Value)>) -> Option<GeoSample> {
    let mut lat = None;
    let mut lon = None;
    let mut timestamp_millis = None;

    for (name, value) in fields {
        match (name, value) {
            ("position_lat", Value::SInt32(val)) => lat = Some(semicircles_to_degrees(*val)),
            ("position_long", Value::SInt32(val)) => lon = Some(semicircles_to_degrees(*val)),
            ("timestamp", Value::Timestamp(val)) => timestamp_millis = Some(val.timestamp_millis()),
            _ => {}
        }
    }

    Some(GeoSample::new(lat?, lon?, timestamp_millis?))
}

fn semicircles_to_degrees(semicircles: i32) -> f64 {
    (semicircles as f64) * (180.0 / 2_147_483_648.0)
}
