use crate::core::dataset::Dataset;
use crate::distance::BoundDistance;
use crate::error::Result;
use rayon::prelude::*;
use tracing::info;

/// Distance between every pair of instances, rows computed in parallel.
///
/// Every cell is evaluated, so measures that are not symmetric or not zero
/// on identical records are reported as they are.
pub fn pairwise_distances(distance: &BoundDistance, dataset: &Dataset) -> Result<Vec<Vec<f64>>> {
    let instances: Vec<_> = dataset.iter().collect();
    info!(
        measure = distance.measure_name(),
        instances = instances.len(),
        "computing pairwise distances"
    );
    instances
        .par_iter()
        .map(|&row| {
            instances
                .iter()
                .map(|&column| distance.distance(row, column))
                .collect::<Result<Vec<f64>>>()
        })
        .collect()
}
