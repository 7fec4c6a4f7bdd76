pub mod eligibility;
pub mod matrix;
pub mod model;
pub mod options;
pub mod trainer;

pub use eligibility::ExclusionReason;
pub use model::{AttributeOutcome, PerAttributeModel, TrainedModel};
pub use options::{
    DiagonalStrategy, LearningOptions, LowWeightPolicy, MultiplyStyle, SelectionScore,
    WeightSource,
};
pub use trainer::AttributeDissimilarityTrainer;
