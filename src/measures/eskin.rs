use crate::core::probability_model::ProbabilityModel;
use crate::error::Result;
use crate::measures::DifferenceStrategy;
use std::sync::Arc;

/// Mismatches cost less on attributes with many distinct values:
/// `1 − n / (n + 2)` for `n` observed values, 0 on a match.
pub struct Eskin {
    model: Arc<ProbabilityModel>,
}

impl Eskin {
    pub fn new(model: Arc<ProbabilityModel>) -> Self {
        Self { model }
    }
}

impl DifferenceStrategy for Eskin {
    fn name(&self) -> &'static str {
        "eskin"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first == second {
            return Ok(0.0);
        }
        let n = self.model.distinct_count(index) as f64;
        Ok(1.0 - n / (n + 2.0))
    }
}
