pub mod metrics;
pub mod sample;
