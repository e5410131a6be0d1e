mod fit;
mod gpx;

use crate::error::ParseError;
use crate::types::sample::GeoSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackFormat {
    Gpx,
    Fit,
}

impl TrackFormat {
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit('.').next()?.to_lowercase();
        match ext.as_str() {
            "gpx" => Some(TrackFormat::Gpx),
            "fit" => Some(TrackFormat::Fit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackFormat::Gpx => "gpx",
            TrackFormat::Fit => "fit",
        }
    }
}

/// Turns a recorded track file into a time-ordered sample sequence.
pub trait Parser {
    fn parse(&self, bytes: &[u8]) -> Result<Vec<GeoSample>, ParseError>;
}

pub fn parse(bytes: &[u8], format: TrackFormat) -> Result<Vec<GeoSample>, ParseError> {
    match format {
        TrackFormat::Gpx => gpx::GpxParser.parse(bytes),
        TrackFormat::Fit => fit::FitParser.parse(bytes),
    }
}
