use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::distance::{BoundDistance, DistanceStats};
use crate::error::{DistanceError, Result};
use tracing::debug;

/// A dataset position and its distance to the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbour {
    pub position: usize,
    pub distance: f64,
}

/// Linear-scan k-nearest-neighbour search. Once `k` neighbours are known the
/// current k-th distance becomes the cutoff, so hopeless candidates stop
/// early.
pub struct NearestNeighbourSearch<'a> {
    distance: &'a BoundDistance,
    dataset: &'a Dataset,
    stats: DistanceStats,
}

impl<'a> NearestNeighbourSearch<'a> {
    pub fn new(distance: &'a BoundDistance, dataset: &'a Dataset) -> Self {
        Self {
            distance,
            dataset,
            stats: DistanceStats::new(),
        }
    }

    /// The `k` closest instances, nearest first. Equal distances keep
    /// dataset order.
    pub fn k_nearest(&mut self, target: &dyn Instance, k: usize) -> Result<Vec<Neighbour>> {
        self.k_nearest_excluding(target, k, None)
    }

    /// Same as [`k_nearest`](Self::k_nearest), ignoring the instance at
    /// `skip` (typically the target itself).
    pub fn k_nearest_excluding(
        &mut self,
        target: &dyn Instance,
        k: usize,
        skip: Option<usize>,
    ) -> Result<Vec<Neighbour>> {
        if k == 0 {
            return Err(DistanceError::InvalidParameter("k must be > 0".into()));
        }
        let mut best: Vec<Neighbour> = Vec::with_capacity(k + 1);
        for (position, candidate) in self.dataset.iter().enumerate() {
            if Some(position) == skip {
                continue;
            }
            let cutoff = (best.len() == k).then(|| best[k - 1].distance);
            let distance =
                self.distance
                    .distance_with_cutoff(target, candidate, cutoff, Some(&mut self.stats))?;
            if cutoff.is_some_and(|c| distance >= c) {
                continue;
            }
            let at = best.partition_point(|n| n.distance <= distance);
            best.insert(at, Neighbour { position, distance });
            best.truncate(k);
        }
        debug!(
            k,
            found = best.len(),
            coordinates = self.stats.coordinates(),
            pruned = self.stats.pruned(),
            "nearest neighbour search"
        );
        Ok(best)
    }

    pub fn stats(&self) -> &DistanceStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dissimilarity::LearningOptions;
    use crate::distance::DistanceFunction;
    use crate::measures::{BaseMeasure, MeasureKind};
    use crate::testing::dummies::weather_nominal;

    fn overlap(data: &Dataset) -> BoundDistance {
        DistanceFunction::new(
            MeasureKind::Statistical(BaseMeasure::Overlap),
            LearningOptions::default(),
        )
        .bind(data)
        .unwrap()
    }

    #[test]
    fn finds_itself_first() {
        let data = weather_nominal();
        let bound = overlap(&data);
        let mut search = NearestNeighbourSearch::new(&bound, &data);
        let found = search.k_nearest(data.get(5).unwrap(), 3).unwrap();
        assert_eq!(found.len(), 3);
        assert_eq!(found[0], Neighbour { position: 5, distance: 0.0 });
        assert!(found.windows(2).all(|w| w[0].distance <= w[1].distance));
    }

    #[test]
    fn matches_brute_force_and_prunes() {
        let data = weather_nominal();
        let bound = overlap(&data);
        let target = data.get(0).unwrap();
        let mut brute: Vec<(f64, usize)> = data
            .iter()
            .enumerate()
            .skip(1)
            .map(|(p, i)| (bound.distance(target, i).unwrap(), p))
            .collect();
        brute.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let mut search = NearestNeighbourSearch::new(&bound, &data);
        let found = search.k_nearest_excluding(target, 4, Some(0)).unwrap();
        let expected: Vec<usize> = brute.iter().take(4).map(|(_, p)| *p).collect();
        let got: Vec<usize> = found.iter().map(|n| n.position).collect();
        assert_eq!(got, expected);
        assert_eq!(search.stats().distances(), 13);
        assert!(search.stats().pruned() > 0);
        assert!(search.stats().coordinates() <= 13 * 5);
    }

    #[test]
    fn k_larger_than_dataset_returns_everything() {
        let data = weather_nominal();
        let bound = overlap(&data);
        let mut search = NearestNeighbourSearch::new(&bound, &data);
        assert_eq!(search.k_nearest(data.get(0).unwrap(), 50).unwrap().len(), 14);
        assert!(matches!(
            search.k_nearest(data.get(0).unwrap(), 0),
            Err(DistanceError::InvalidParameter(_))
        ));
    }
}
