use crate::core::instances::Instance;
use crate::evaluation::auc::{
    ScoredPrediction, one_vs_rest_auc, pairwise_average_auc, weighted_roc_auc,
};
use crate::evaluation::{ConfusionMatrix, Measurement, PerformanceEvaluator};

/// Batch evaluator for one fold: accumulates a confusion matrix and the
/// predicted distributions needed for the ranked AUC.
///
/// Reports `accuracy`, `kappa`, `auc_pairwise`, `auc_one_vs_rest` and
/// `auc_weighted`.
pub struct ConfusionMatrixEvaluator {
    matrix: ConfusionMatrix,
    predictions: Vec<ScoredPrediction>,
    num_classes: usize,
}

impl ConfusionMatrixEvaluator {
    pub fn new(num_classes: usize) -> Self {
        Self {
            matrix: ConfusionMatrix::new(num_classes),
            predictions: Vec::new(),
            num_classes,
        }
    }

    /// Position of the largest finite vote; the first one wins ties.
    #[inline]
    pub fn argmax(v: &[f64]) -> Option<usize> {
        let mut best = None;
        let mut best_value = f64::NEG_INFINITY;
        for (i, &x) in v.iter().enumerate() {
            if !x.is_finite() {
                continue;
            }
            if best.is_none() || x > best_value {
                best = Some(i);
                best_value = x;
            }
        }
        best
    }

    fn distribution(&self, votes: &[f64]) -> Vec<f64> {
        let mut dist: Vec<f64> = votes
            .iter()
            .map(|&v| if v.is_finite() && v > 0.0 { v } else { 0.0 })
            .collect();
        dist.resize(self.num_classes.max(dist.len()), 0.0);
        let sum: f64 = dist.iter().sum();
        if sum > 0.0 {
            dist.iter_mut().for_each(|d| *d /= sum);
        }
        dist
    }

    pub fn confusion_matrix(&self) -> &ConfusionMatrix {
        &self.matrix
    }

    pub fn into_confusion_matrix(self) -> ConfusionMatrix {
        self.matrix
    }
}

impl PerformanceEvaluator for ConfusionMatrixEvaluator {
    fn reset(&mut self) {
        *self = Self::new(self.num_classes);
    }

    fn add_result(&mut self, example: &dyn Instance, class_votes: Vec<f64>) {
        let Some(yf) = example.class_value() else {
            return;
        };
        if !yf.is_finite() {
            return;
        }
        let y = yf as usize;
        let Some(yhat) = Self::argmax(&class_votes) else {
            return;
        };
        let w = example.weight();
        if w <= 0.0 {
            return;
        }
        self.num_classes = self.num_classes.max(y + 1).max(class_votes.len());
        self.matrix.add(y, yhat, w);
        let distribution = self.distribution(&class_votes);
        self.predictions.push(ScoredPrediction {
            actual: y,
            distribution,
            weight: w,
        });
    }

    fn performance(&self) -> Vec<Measurement> {
        vec![
            Measurement::new("accuracy", self.matrix.accuracy()),
            Measurement::new("kappa", self.matrix.kappa()),
            Measurement::new("auc_pairwise", pairwise_average_auc(&self.matrix)),
            Measurement::new("auc_one_vs_rest", one_vs_rest_auc(&self.matrix)),
            Measurement::new(
                "auc_weighted",
                weighted_roc_auc(&self.predictions, self.num_classes),
            ),
        ]
    }
}
