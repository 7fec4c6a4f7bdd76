pub mod classifiers;
pub mod core;
pub mod dissimilarity;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod measures;
pub mod tasks;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use distance::{BoundDistance, DistanceFunction};
pub use error::{DistanceError, Result};
pub use measures::{BaseMeasure, MeasureKind};
