pub mod batch;
pub mod distance;
pub mod segment;
pub mod stream;

pub use batch::analyze;
pub use distance::distance_meters;
pub use stream::TripAccumulator;
