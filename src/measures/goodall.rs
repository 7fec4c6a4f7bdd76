use crate::core::probability_model::ProbabilityModel;
use crate::error::Result;
use crate::measures::DifferenceStrategy;
use std::sync::Arc;

/// Matches on frequent values count for more: a match on `x` scores the
/// probability of drawing a pair of any value at most as frequent as `x`.
/// Mismatches score 1.
pub struct Goodall {
    model: Arc<ProbabilityModel>,
}

impl Goodall {
    pub fn new(model: Arc<ProbabilityModel>) -> Self {
        Self { model }
    }

    fn rarer_pair_probability(&self, index: usize, value: &str) -> f64 {
        let base = self.model.probability_a(index, value);
        let Some(nominal) = self.model.header().nominal_at_index(index) else {
            return 0.0;
        };
        nominal
            .values
            .iter()
            .filter(|v| self.model.probability_a(index, v) <= base)
            .map(|v| self.model.probability_b(index, v))
            .sum()
    }
}

impl DifferenceStrategy for Goodall {
    fn name(&self) -> &'static str {
        "goodall"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first != second {
            return Ok(1.0);
        }
        Ok(self.rarer_pair_probability(index, first))
    }
}
