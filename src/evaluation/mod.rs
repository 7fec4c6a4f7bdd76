pub mod auc;
mod confusion_matrix;
mod cross_validation;
mod estimators;
mod evaluators;
mod folds;
mod measurement;

pub use auc::AucVariant;
pub use confusion_matrix::ConfusionMatrix;
pub use cross_validation::{ClassifierEvaluator, ClassifierResult, EvaluationError};
pub use estimators::{BasicEstimator, Estimator};
pub use evaluators::{ConfusionMatrixEvaluator, PerformanceEvaluator};
pub use folds::StratifiedFolds;
pub use measurement::{Measurement, find_measurement};
