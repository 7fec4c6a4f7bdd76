use crate::classifiers::Candidate;
use crate::core::dataset::Dataset;
use crate::evaluation::auc::AucVariant;
use crate::evaluation::measurement::find_measurement;
use crate::evaluation::{
    BasicEstimator, ConfusionMatrix, ConfusionMatrixEvaluator, Estimator, Measurement,
    PerformanceEvaluator, StratifiedFolds,
};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error, PartialEq)]
pub enum EvaluationError {
    #[error("dataset has no nominal class attribute")]
    NoClassAttribute,

    #[error("need at least two labeled instances, found {found}")]
    NotEnoughInstances { found: usize },

    #[error("classifier '{classifier}' produced no usable votes for instance {position}")]
    NoVotes { classifier: String, position: usize },
}

/// Cross-validated performance of one candidate classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierResult {
    pub classifier_name: String,
    /// Summed over folds.
    pub confusion_matrix: ConfusionMatrix,
    /// Fold average of the configured AUC variant.
    pub auc: f64,
    /// Fold average of Cohen's kappa.
    pub kappa: f64,
    /// Fold averages of every reported metric.
    pub measurements: Vec<Measurement>,
}

impl ClassifierResult {
    pub fn measurement(&self, name: &str) -> Option<f64> {
        find_measurement(&self.measurements, name)
    }
}

/// Stratified k-fold cross-validation of classifier candidates.
#[derive(Debug, Clone)]
pub struct ClassifierEvaluator {
    folds: usize,
    seed: u64,
    auc_variant: AucVariant,
}

impl Default for ClassifierEvaluator {
    fn default() -> Self {
        Self::new(10, 1, AucVariant::default())
    }
}

impl ClassifierEvaluator {
    pub fn new(folds: usize, seed: u64, auc_variant: AucVariant) -> Self {
        Self {
            folds,
            seed,
            auc_variant,
        }
    }

    /// Trains a fresh classifier per fold on the other folds and scores the
    /// held-out instances. `dataset` must designate a nominal class attribute.
    pub fn evaluate(
        &self,
        dataset: &Dataset,
        candidate: &Candidate,
    ) -> Result<ClassifierResult, EvaluationError> {
        let header = dataset.header_arc();
        let num_classes = header.number_of_classes();
        if num_classes == 0 {
            return Err(EvaluationError::NoClassAttribute);
        }

        let folds = StratifiedFolds::new(dataset, self.folds, self.seed);
        if folds.is_empty() {
            let found = dataset.iter().filter(|i| !i.is_class_missing()).count();
            return Err(EvaluationError::NotEnoughInstances { found });
        }

        let metric_names = [
            "accuracy",
            "kappa",
            "auc_pairwise",
            "auc_one_vs_rest",
            "auc_weighted",
        ];
        let mut averages = [BasicEstimator::default(); 5];
        let mut total = ConfusionMatrix::new(num_classes);

        for k in 0..folds.len() {
            let mut classifier = candidate.build();
            classifier.set_model_context(std::sync::Arc::clone(&header));
            for pos in folds.train_positions(k) {
                if let Some(instance) = dataset.get(pos) {
                    classifier.train_on_instance(instance);
                }
            }

            let mut evaluator = ConfusionMatrixEvaluator::new(num_classes);
            for &pos in folds.test_positions(k) {
                let Some(instance) = dataset.get(pos) else {
                    continue;
                };
                let votes = classifier.get_votes_for_instance(instance);
                if ConfusionMatrixEvaluator::argmax(&votes).is_none() {
                    warn!(
                        classifier = candidate.name(),
                        position = pos,
                        "classifier produced no usable votes"
                    );
                    return Err(EvaluationError::NoVotes {
                        classifier: candidate.name().to_string(),
                        position: pos,
                    });
                }
                evaluator.add_result(instance, votes);
            }

            for (estimator, name) in averages.iter_mut().zip(metric_names) {
                estimator.add(evaluator.metric(name));
            }
            total.merge(evaluator.confusion_matrix());
        }

        let measurements: Vec<Measurement> = metric_names
            .iter()
            .zip(averages.iter())
            .map(|(name, est)| Measurement::new(*name, est.estimation()))
            .collect();
        let auc = find_measurement(&measurements, self.auc_variant.measurement_name())
            .filter(|v| v.is_finite())
            .unwrap_or(0.5);
        let kappa = find_measurement(&measurements, "kappa")
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        debug!(
            classifier = candidate.name(),
            folds = folds.len(),
            auc,
            kappa,
            "cross-validation finished"
        );

        Ok(ClassifierResult {
            classifier_name: candidate.name().to_string(),
            confusion_matrix: total,
            auc,
            kappa,
            measurements,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::Classifier;
    use crate::classifiers::rules::MajorityClass;
    use crate::testing::dummies::weather_nominal;
    use crate::testing::stubs::{OracleClassifier, SilentClassifier, TrainSpyClassifier};

    fn oracle() -> Candidate {
        Candidate::new(|| Box::new(OracleClassifier::default()) as Box<dyn Classifier>)
    }

    #[test]
    fn oracle_scores_perfectly() {
        let data = weather_nominal().with_class_index(Some(0));
        let result = ClassifierEvaluator::default().evaluate(&data, &oracle()).unwrap();
        assert_eq!(result.classifier_name, "oracle");
        assert!((result.kappa - 1.0).abs() < 1e-12);
        assert!((result.auc - 1.0).abs() < 1e-12);
        assert_eq!(result.confusion_matrix.total(), 14.0);
        assert_eq!(result.confusion_matrix.correct(), 14.0);
        assert_eq!(result.confusion_matrix.get(0, 0), 5.0);
    }

    #[test]
    fn every_instance_is_held_out_once_and_trained_on_k_minus_one_times() {
        let data = weather_nominal().with_class_index(Some(4));
        let (_, handle) = TrainSpyClassifier::new();
        let shared = handle.clone();
        let spy = Candidate::new(move || {
            Box::new(TrainSpyClassifier::sharing(&shared)) as Box<dyn Classifier>
        });
        let calls_before = handle.count();
        let result = ClassifierEvaluator::new(7, 1, AucVariant::PairwiseAverage)
            .evaluate(&data, &spy)
            .unwrap();
        assert_eq!(result.confusion_matrix.total(), 14.0);
        assert_eq!(handle.count() - calls_before, 14 * 6);
    }

    #[test]
    fn majority_class_has_no_skill() {
        let data = weather_nominal().with_class_index(Some(4));
        let mc = Candidate::new(|| Box::new(MajorityClass::new()) as Box<dyn Classifier>);
        let result = ClassifierEvaluator::default().evaluate(&data, &mc).unwrap();
        assert!(result.confusion_matrix.kappa().abs() < 1e-12);
        assert_eq!(result.confusion_matrix.column_sum(1), 0.0);
        assert!(result.kappa < 1.0);
    }

    #[test]
    fn silent_classifier_fails() {
        let data = weather_nominal().with_class_index(Some(2));
        let silent = Candidate::new(|| Box::new(SilentClassifier) as Box<dyn Classifier>);
        let err = ClassifierEvaluator::default()
            .evaluate(&data, &silent)
            .unwrap_err();
        assert!(matches!(err, EvaluationError::NoVotes { .. }));
    }

    #[test]
    fn requires_class_attribute() {
        let data = weather_nominal();
        assert_eq!(
            ClassifierEvaluator::default().evaluate(&data, &oracle()),
            Err(EvaluationError::NoClassAttribute)
        );
    }

    #[test]
    fn measurements_include_every_auc_variant() {
        let data = weather_nominal().with_class_index(Some(1));
        let result = ClassifierEvaluator::new(3, 9, AucVariant::External)
            .evaluate(&data, &oracle())
            .unwrap();
        for name in ["auc_pairwise", "auc_one_vs_rest", "auc_weighted"] {
            assert!(result.measurement(name).is_some());
        }
        assert_eq!(result.measurement("auc_weighted"), Some(result.auc));
    }
}
