mod attribute_range;
mod distance_function;
mod stats;

pub use attribute_range::parse_attribute_range;
pub use distance_function::{BoundDistance, DistanceFunction};
pub use stats::DistanceStats;
