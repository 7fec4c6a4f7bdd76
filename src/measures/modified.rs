use crate::dissimilarity::TrainedModel;
use crate::error::{DistanceError, Result};
use crate::measures::{Aggregation, DifferenceStrategy, WeightAdjustment};
use std::sync::Arc;

/// A statistical measure whose differences are scaled by trained attribute
/// weights.
pub struct ModifiedDifference {
    base: Box<dyn DifferenceStrategy>,
    model: Arc<TrainedModel>,
    adjustment: WeightAdjustment,
}

impl ModifiedDifference {
    pub fn new(
        base: Box<dyn DifferenceStrategy>,
        model: Arc<TrainedModel>,
        adjustment: WeightAdjustment,
    ) -> Self {
        Self {
            base,
            model,
            adjustment,
        }
    }
}

impl DifferenceStrategy for ModifiedDifference {
    fn name(&self) -> &'static str {
        self.base.name()
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        let weight = self
            .model
            .weight(index)
            .ok_or(DistanceError::AttributeNotModeled { index })?;
        let base = self.base.difference(index, first, second)?;
        Ok(self.adjustment.apply(weight, base, first == second))
    }

    fn aggregation(&self) -> Aggregation {
        self.base.aggregation()
    }

    fn pair_weight(
        &self,
        first: &dyn crate::core::instances::Instance,
        second: &dyn crate::core::instances::Instance,
        considered: &[usize],
    ) -> f64 {
        self.base.pair_weight(first, second, considered)
    }
}
