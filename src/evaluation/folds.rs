use crate::core::dataset::Dataset;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Stratified assignment of instance positions to cross-validation folds.
///
/// Positions are shuffled once with a seeded generator, stably grouped by
/// class label and dealt round-robin, so every fold keeps roughly the class
/// proportions of the whole dataset. Instances whose class is missing are
/// left out.
#[derive(Debug, Clone, PartialEq)]
pub struct StratifiedFolds {
    folds: Vec<Vec<usize>>,
}

impl StratifiedFolds {
    /// The fold count is clamped to `[2, labeled instances]`. With fewer
    /// than two labeled instances there are no folds at all.
    pub fn new(dataset: &Dataset, num_folds: usize, seed: u64) -> Self {
        let mut labeled: Vec<(usize, usize)> = dataset
            .iter()
            .enumerate()
            .filter(|(_, inst)| !inst.is_class_missing())
            .filter_map(|(pos, inst)| inst.class_value().map(|c| (pos, c as usize)))
            .collect();

        if labeled.len() < 2 {
            return Self { folds: Vec::new() };
        }
        let num_folds = num_folds.clamp(2, labeled.len());

        let mut rng = StdRng::seed_from_u64(seed);
        labeled.shuffle(&mut rng);
        labeled.sort_by_key(|&(_, class)| class);

        let mut folds = vec![Vec::new(); num_folds];
        for (i, (pos, _)) in labeled.into_iter().enumerate() {
            folds[i % num_folds].push(pos);
        }
        for fold in folds.iter_mut() {
            fold.sort_unstable();
        }
        Self { folds }
    }

    pub fn len(&self) -> usize {
        self.folds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folds.is_empty()
    }

    /// Held-out positions of fold `k`.
    pub fn test_positions(&self, k: usize) -> &[usize] {
        self.folds.get(k).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Positions of every other fold, ascending.
    pub fn train_positions(&self, k: usize) -> Vec<usize> {
        let mut train: Vec<usize> = self
            .folds
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != k)
            .flat_map(|(_, f)| f.iter().copied())
            .collect();
        train.sort_unstable();
        train
    }
}
