use crate::core::instances::Instance;
use crate::evaluation::Measurement;
use crate::evaluation::measurement::find_measurement;

/// Scores one held-out fold from the class votes a candidate casts on it.
pub trait PerformanceEvaluator {
    /// Forgets every fold result; the class count is kept.
    fn reset(&mut self);

    /// Examples with a missing class or without a finite vote are skipped.
    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>);

    fn performance(&self) -> Vec<Measurement>;

    /// A single fold metric, NaN when the evaluator does not report it so a
    /// fold average over it stays NaN.
    fn metric(&self, name: &str) -> f64 {
        find_measurement(&self.performance(), name).unwrap_or(f64::NAN)
    }
}
