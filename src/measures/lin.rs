use crate::core::instances::{Instance, MISSING_VALUE};
use crate::core::probability_model::ProbabilityModel;
use crate::error::Result;
use crate::measures::{Aggregation, DifferenceStrategy};
use std::sync::Arc;

/// Lin's information-theoretic measure as a dissimilarity.
///
/// Per attribute the similarity term is `S = 2·ln p(x)` on a match and
/// `S = 2·ln(p(x) + p(y))` otherwise, against the information content
/// `D = ln p(x) + ln p(y)` of the pair. The difference is `S − D`, and the
/// record pair is scaled by `1 / −ΣD`, giving `1 − ΣS/ΣD`.
///
/// A coordinate with `"?"` on either side costs 1 before scaling, like under
/// every other measure. Inside `ΣD` such a value, and one absent from a
/// sparse record, counts as the empty label at the floor probability.
pub struct Lin {
    model: Arc<ProbabilityModel>,
}

impl Lin {
    pub fn new(model: Arc<ProbabilityModel>) -> Self {
        Self { model }
    }

    /// Probability of `value`, floored at `1/(2N)` for unseen values.
    fn probability(&self, index: usize, value: &str) -> f64 {
        let n = self.model.total_instances().max(1) as f64;
        self.model.probability_a(index, value).max(1.0 / (2.0 * n))
    }

    fn information(&self, index: usize, first: &str, second: &str) -> f64 {
        self.probability(index, first).ln() + self.probability(index, second).ln()
    }
}

impl DifferenceStrategy for Lin {
    fn name(&self) -> &'static str {
        "lin"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first == second {
            return Ok(0.0);
        }
        let joint = (self.probability(index, first) + self.probability(index, second)).min(1.0);
        let similarity = 2.0 * joint.ln();
        Ok((similarity - self.information(index, first, second)).max(0.0))
    }

    fn aggregation(&self) -> Aggregation {
        Aggregation::PairWeighted
    }

    fn pair_weight(&self, first: &dyn Instance, second: &dyn Instance, considered: &[usize]) -> f64 {
        let label = |inst: &dyn Instance, index: usize| {
            inst.string_value(index)
                .filter(|v| v != MISSING_VALUE)
                .unwrap_or_default()
        };
        let total: f64 = considered
            .iter()
            .filter(|&&i| self.model.header().nominal_at_index(i).is_some())
            .map(|&i| self.information(i, &label(first, i), &label(second, i)))
            .sum();
        if total < 0.0 { 1.0 / -total } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::weather_nominal;

    #[test]
    fn match_is_zero_and_mismatch_positive() {
        let data = weather_nominal();
        let lin = Lin::new(Arc::new(ProbabilityModel::from_dataset(&data)));
        assert_eq!(lin.difference(0, "sunny", "sunny").unwrap(), 0.0);
        let d = lin.difference(0, "sunny", "overcast").unwrap();
        let expected = 2.0 * (9.0f64 / 14.0).ln() - ((5.0f64 / 14.0).ln() + (4.0f64 / 14.0).ln());
        assert!((d - expected).abs() < 1e-12);
        assert_eq!(d, lin.difference(0, "overcast", "sunny").unwrap());
    }

    #[test]
    fn pair_weight_normalizes_by_information() {
        let data = weather_nominal();
        let lin = Lin::new(Arc::new(ProbabilityModel::from_dataset(&data)));
        let a = data.get(0).unwrap();
        let b = data.get(1).unwrap();
        let considered: Vec<usize> = (0..5).collect();
        let w = lin.pair_weight(a, b, &considered);
        assert!(w > 0.0);
        let d = lin.difference(3, "FALSE", "TRUE").unwrap() * w;
        assert!(d > 0.0 && d < 1.0);
    }
}
