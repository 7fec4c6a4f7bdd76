use crate::core::instance_header::InstanceHeader;
use crate::dissimilarity::{AttributeOutcome, TrainedModel};
use crate::error::{DistanceError, Result};
use crate::measures::{Aggregation, DifferenceStrategy, WeightAdjustment};
use std::sync::Arc;

/// Looks differences up in the trained per-attribute tables.
///
/// Excluded attributes contribute 0. Weights already scale every
/// attribute, so differences are summed.
pub struct LearnedDifference {
    header: Arc<InstanceHeader>,
    model: Arc<TrainedModel>,
    adjustment: WeightAdjustment,
}

impl LearnedDifference {
    pub fn new(
        header: Arc<InstanceHeader>,
        model: Arc<TrainedModel>,
        adjustment: WeightAdjustment,
    ) -> Self {
        Self {
            header,
            model,
            adjustment,
        }
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }
}

impl DifferenceStrategy for LearnedDifference {
    fn name(&self) -> &'static str {
        "learning-based"
    }

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        let table = match self.model.outcome(index) {
            None => return Err(DistanceError::AttributeNotModeled { index }),
            Some(AttributeOutcome::Excluded(_)) => return Ok(0.0),
            Some(AttributeOutcome::Modeled(m)) => m,
        };
        if table.weight == 0.0 {
            return Ok(0.0);
        }
        let base = match table.dissimilarity(first, second) {
            Some(d) => d,
            None if first.is_empty() || second.is_empty() => 1.0,
            None => {
                let unknown = if table.dissimilarity.contains_key(first) {
                    second
                } else {
                    first
                };
                return Err(DistanceError::UnknownValue {
                    attribute: self
                        .header
                        .attribute_at_index(index)
                        .map(|a| a.name())
                        .unwrap_or_default(),
                    value: unknown.to_string(),
                });
            }
        };
        Ok(self.adjustment.apply(table.weight, base, first == second))
    }

    fn aggregation(&self) -> Aggregation {
        Aggregation::Sum
    }
}
