mod difference_strategy;
mod eskin;
mod gambaryan;
mod goodall;
mod learned;
mod lin;
mod measure_kind;
mod modified;
mod occurrence_frequency;
mod overlap;
mod weight_adjustment;

pub use difference_strategy::{Aggregation, DifferenceStrategy};
pub use eskin::Eskin;
pub use gambaryan::Gambaryan;
pub use goodall::Goodall;
pub use learned::LearnedDifference;
pub use lin::Lin;
pub use measure_kind::{BaseMeasure, MeasureKind};
pub use modified::ModifiedDifference;
pub use occurrence_frequency::{InverseOccurrenceFrequency, OccurrenceFrequency};
pub use overlap::Overlap;
pub use weight_adjustment::WeightAdjustment;
