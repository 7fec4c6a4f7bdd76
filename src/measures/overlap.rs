use crate::error::Result;
use crate::measures::DifferenceStrategy;

/// 0 when the labels are equal, 1 otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overlap;

impl DifferenceStrategy for Overlap {
    fn name(&self) -> &'static str {
        "overlap"
    }

    fn difference(&self, _index: usize, first: &str, second: &str) -> Result<f64> {
        Ok(if first == second { 0.0 } else { 1.0 })
    }
}
