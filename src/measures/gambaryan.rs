use crate::core::probability_model::ProbabilityModel;
use crate::error::Result;
use crate::measures::{Aggregation, DifferenceStrategy};
use crate::utils::math::binary_entropy;
use std::sync::Arc;

/// A match on `x` scores `1 − H(p(x))`, so matches on values seen about half
/// the time count as most similar. Mismatches score 1. Differences are
/// averaged over the declared values of every attribute.
pub struct Gambaryan {
    model: Arc<ProbabilityModel>,
}

impl Gambaryan {
    pub fn new(model: Arc<ProbabilityModel>) -> Self {
        Self { model }
    }
}

impl DifferenceStrategy for Gambaryan {
    fn name(&self) -> &'static str {
        "gambaryan"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first != second {
            return Ok(1.0);
        }
        Ok(1.0 - binary_entropy(self.model.probability_a(index, first)))
    }

    fn aggregation(&self) -> Aggregation {
        Aggregation::PerDeclaredValue
    }
}
