use crate::core::probability_model::ProbabilityModel;
use crate::error::Result;
use crate::measures::DifferenceStrategy;
use std::sync::Arc;

fn frequencies(model: &ProbabilityModel, index: usize, first: &str, second: &str) -> Option<(f64, f64)> {
    let fa = model.frequency(index, first);
    let fb = model.frequency(index, second);
    if fa == 0 || fb == 0 {
        None
    } else {
        Some((fa as f64, fb as f64))
    }
}

/// Mismatches on rare values are more dissimilar:
/// `1 − 1 / (1 + log10(N/fA) · log10(N/fB))`.
pub struct OccurrenceFrequency {
    model: Arc<ProbabilityModel>,
}

impl OccurrenceFrequency {
    pub fn new(model: Arc<ProbabilityModel>) -> Self {
        Self { model }
    }
}

impl DifferenceStrategy for OccurrenceFrequency {
    fn name(&self) -> &'static str {
        "occurrence-frequency"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first == second {
            return Ok(0.0);
        }
        let Some((fa, fb)) = frequencies(&self.model, index, first, second) else {
            return Ok(1.0);
        };
        let n = self.model.total_instances() as f64;
        Ok(1.0 - 1.0 / (1.0 + (n / fa).log10() * (n / fb).log10()))
    }
}

/// Mismatches on frequent values are more dissimilar:
/// `1 − 1 / (1 + log10(fA) · log10(fB))`.
pub struct InverseOccurrenceFrequency {
    model: Arc<ProbabilityModel>,
}

impl InverseOccurrenceFrequency {
    pub fn new(model: Arc<ProbabilityModel>) -> Self {
        Self { model }
    }
}

impl DifferenceStrategy for InverseOccurrenceFrequency {
    fn name(&self) -> &'static str {
        "inverse-occurrence-frequency"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first == second {
            return Ok(0.0);
        }
        let Some((fa, fb)) = frequencies(&self.model, index, first, second) else {
            return Ok(1.0);
        };
        Ok(1.0 - 1.0 / (1.0 + fa.log10() * fb.log10()))
    }
}
