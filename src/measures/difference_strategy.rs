use crate::core::instances::Instance;
use crate::error::Result;

/// How per-attribute differences are folded into a record distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// `running + diff / number_of_attributes`
    Mean,
    /// `running + diff / total_declared_values`
    PerDeclaredValue,
    /// `running + diff`
    Sum,
    /// `running + diff · pair_weight`, the weight computed once per record pair.
    PairWeighted,
}

/// Difference between two values of one nominal attribute.
///
/// Values are labels. An empty string stands for a value absent from a
/// sparse record; explicit missing values never reach a strategy.
pub trait DifferenceStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64>;

    fn aggregation(&self) -> Aggregation {
        Aggregation::Mean
    }

    /// Scale applied to every difference of one record pair under
    /// [`Aggregation::PairWeighted`]. `considered` lists the attribute
    /// indices taking part in the distance.
    fn pair_weight(&self, _first: &dyn Instance, _second: &dyn Instance, _considered: &[usize]) -> f64 {
        1.0
    }
}
