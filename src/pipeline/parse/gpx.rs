use crate::error::ParseError;
use crate::pipeline::parse::Parser;
use crate::types::sample::GeoSample;
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;

pub struct GpxParser;

/// A `trkpt` being read; only kept if it ends up with a timestamp.
struct PendingPoint {
    lat: f64,
    lon: f64,
    time: Option<DateTime<Utc>>,
}

impl Parser for GpxParser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<GeoSample>, ParseError> {
        let mut reader = Reader::from_reader(bytes);
        reader.trim_text(true);

        let mut samples = Vec::new();
        let mut skipped = 0usize;
        let mut current: Option<PendingPoint> = None;
        let mut in_time = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let name = e.name();
                    let name_str = std::str::from_utf8(name.as_ref())
                        .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

                    if name_str == "trkpt" {
                        let mut lat = None;
                        let mut lon = None;

                        for attr in e.attributes() {
                            let attr = attr.map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                            let value = std::str::from_utf8(&attr.value)
                                .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;

                            match attr.key.as_ref() {
                                b"lat" => lat = value.parse().ok(),
                                b"lon" => lon = value.parse().ok(),
                                _ => {}
                            }
                        }

                        current = match (lat, lon) {
                            (Some(lat), Some(lon)) => Some(PendingPoint { lat, lon, time: None }),
                            _ => None,
                        };
                    } else {
                        in_time = current.is_some() && name_str == "time";
                    }
                }
                Ok(Event::Text(e)) => {
                    if in_time {
                        if let Some(point) = current.as_mut() {
                            let text = e
                                .unescape()
                                .map_err(|e| ParseError::InvalidGpx(e.to_string()))?;
                            point.time = text.parse::<DateTime<Utc>>().ok();
                        }
                    }
                }
                Ok(Event::End(e)) => {
                    in_time = false;
                    if e.name().as_ref() == b"trkpt" {
                        match current.take() {
                            Some(PendingPoint { lat, lon, time: Some(time) }) => {
                                samples.push(GeoSample::new(lat, lon, time.timestamp_millis()));
                            }
                            Some(_) => skipped += 1,
                            None => {}
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::InvalidGpx(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} GPX track points without a timestamp", skipped);
        }

        if samples.is_empty() {
            return Err(ParseError::EmptyFile);
        }

        Ok(samples)
    }
}
