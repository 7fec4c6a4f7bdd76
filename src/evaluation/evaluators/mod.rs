mod confusion_matrix_evaluator;
mod performance_evaluator;

pub use confusion_matrix_evaluator::ConfusionMatrixEvaluator;
pub use performance_evaluator::PerformanceEvaluator;
