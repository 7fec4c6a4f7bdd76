//! Area-under-ROC estimates used to score candidate classifiers.

use crate::evaluation::ConfusionMatrix;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// Which AUC estimate represents a classifier during selection.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    EnumMessage,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AucVariant {
    #[default]
    #[strum(
        message = "Pairwise average",
        detailed_message = "Mean balanced accuracy over every pair of classes of the confusion matrix."
    )]
    PairwiseAverage,
    #[strum(
        message = "One vs rest",
        detailed_message = "Balanced accuracy of the confusion matrix pooled over one-vs-rest splits."
    )]
    OneVsRest,
    #[strum(
        message = "External (ranked)",
        detailed_message = "Class-frequency weighted one-vs-rest ROC AUC ranked by predicted probabilities."
    )]
    External,
}

impl AucVariant {
    /// Name of the matching measurement reported by the evaluator.
    pub fn measurement_name(self) -> &'static str {
        match self {
            AucVariant::PairwiseAverage => "auc_pairwise",
            AucVariant::OneVsRest => "auc_one_vs_rest",
            AucVariant::External => "auc_weighted",
        }
    }
}

#[inline]
fn rate(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        1.0
    }
}

#[inline]
fn balanced_accuracy(tp: f64, fn_: f64, fp: f64, tn: f64) -> f64 {
    (rate(tp, tp + fn_) + rate(tn, tn + fp)) / 2.0
}

/// Mean over class pairs `i < j` of the balanced accuracy of the 2×2
/// sub-matrix restricted to those two classes.
pub fn pairwise_average_auc(matrix: &ConfusionMatrix) -> f64 {
    let k = matrix.num_classes();
    if k < 2 {
        return 0.5;
    }
    let mut sum = 0.0;
    let mut pairs = 0usize;
    for i in 0..k {
        for j in (i + 1)..k {
            sum += balanced_accuracy(
                matrix.get(i, i),
                matrix.get(i, j),
                matrix.get(j, i),
                matrix.get(j, j),
            );
            pairs += 1;
        }
    }
    sum / pairs as f64
}

/// Balanced accuracy of the one-vs-rest counts pooled over every class.
pub fn one_vs_rest_auc(matrix: &ConfusionMatrix) -> f64 {
    let k = matrix.num_classes();
    if k < 2 {
        return 0.5;
    }
    let total = matrix.total();
    let (mut tp, mut fn_, mut fp, mut tn) = (0.0, 0.0, 0.0, 0.0);
    for c in 0..k {
        let c_tp = matrix.get(c, c);
        let c_fn = matrix.row_sum(c) - c_tp;
        let c_fp = matrix.column_sum(c) - c_tp;
        tp += c_tp;
        fn_ += c_fn;
        fp += c_fp;
        tn += total - c_tp - c_fn - c_fp;
    }
    balanced_accuracy(tp, fn_, fp, tn)
}

/// One held-out prediction: true class, predicted distribution and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPrediction {
    pub actual: usize,
    pub distribution: Vec<f64>,
    pub weight: f64,
}

/// Mann-Whitney estimate of the ROC area for `class` against the rest,
/// ranking by the predicted probability of `class`. Ties count one half.
/// `None` when either side has no weight.
pub fn roc_auc_for_class(predictions: &[ScoredPrediction], class: usize) -> Option<f64> {
    let mut scored: Vec<(f64, bool, f64)> = predictions
        .iter()
        .filter(|p| p.weight > 0.0)
        .map(|p| {
            let score = p.distribution.get(class).copied().unwrap_or(0.0);
            let score = if score.is_finite() { score } else { 0.0 };
            (score, p.actual == class, p.weight)
        })
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    let positives: f64 = scored.iter().filter(|s| s.1).map(|s| s.2).sum();
    let negatives: f64 = scored.iter().filter(|s| !s.1).map(|s| s.2).sum();
    if positives <= 0.0 || negatives <= 0.0 {
        return None;
    }

    let mut area = 0.0;
    let mut negatives_below = 0.0;
    let mut start = 0;
    while start < scored.len() {
        let mut end = start;
        let (mut pos_group, mut neg_group) = (0.0, 0.0);
        while end < scored.len() && scored[end].0 == scored[start].0 {
            if scored[end].1 {
                pos_group += scored[end].2;
            } else {
                neg_group += scored[end].2;
            }
            end += 1;
        }
        area += pos_group * (negatives_below + 0.5 * neg_group);
        negatives_below += neg_group;
        start = end;
    }
    Some(area / (positives * negatives))
}

/// One-vs-rest ROC areas averaged with weights proportional to class
/// frequency. Classes that cannot be scored are left out; 0.5 when none can.
pub fn weighted_roc_auc(predictions: &[ScoredPrediction], num_classes: usize) -> f64 {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for class in 0..num_classes {
        let class_weight: f64 = predictions
            .iter()
            .filter(|p| p.actual == class)
            .map(|p| p.weight)
            .sum();
        if let Some(auc) = roc_auc_for_class(predictions, class) {
            weighted_sum += class_weight * auc;
            weight_total += class_weight;
        }
    }
    if weight_total > 0.0 {
        weighted_sum / weight_total
    } else {
        0.5
    }
}
