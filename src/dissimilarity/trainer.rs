use crate::classifiers::{Candidate, default_candidates};
use crate::core::dataset::Dataset;
use crate::dissimilarity::eligibility::{ExclusionReason, check_eligibility};
use crate::dissimilarity::matrix::{complement, normalize_rows, symmetrize};
use crate::dissimilarity::model::{AttributeOutcome, PerAttributeModel, TrainedModel};
use crate::dissimilarity::options::{LearningOptions, SelectionScore, WeightSource};
use crate::error::{DistanceError, Result};
use crate::evaluation::{ClassifierEvaluator, ClassifierResult};
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Learns a weight and a value-pair dissimilarity table for every nominal
/// attribute by predicting it from the other attributes.
pub struct AttributeDissimilarityTrainer {
    options: LearningOptions,
    candidates: Option<Vec<Candidate>>,
}

impl AttributeDissimilarityTrainer {
    /// Uses the default candidates, chosen per dataset size.
    pub fn new(options: LearningOptions) -> Self {
        Self {
            options,
            candidates: None,
        }
    }

    pub fn with_candidates(options: LearningOptions, candidates: Vec<Candidate>) -> Self {
        Self {
            options,
            candidates: Some(candidates),
        }
    }

    pub fn options(&self) -> &LearningOptions {
        &self.options
    }

    /// Trains every attribute except the dataset's class attribute, if any.
    /// The outcome does not depend on `parallel`.
    pub fn train(&self, dataset: &Dataset) -> Result<TrainedModel> {
        if dataset.is_empty() {
            return Err(DistanceError::EmptyDataset);
        }
        let candidates = match &self.candidates {
            Some(c) if c.is_empty() => {
                return Err(DistanceError::InvalidParameter(
                    "at least one candidate classifier is required".into(),
                ));
            }
            Some(c) => c.clone(),
            None => default_candidates(dataset.len(), self.options.lazy_classifier_limit),
        };
        let evaluator = ClassifierEvaluator::new(
            self.options.folds,
            self.options.seed,
            self.options.auc_variant,
        );

        let indices: Vec<usize> = (0..dataset.number_of_attributes())
            .filter(|&i| Some(i) != dataset.header().class_index())
            .collect();

        info!(
            relation = dataset.header().relation_name(),
            attributes = indices.len(),
            instances = dataset.len(),
            candidates = candidates.len(),
            strategy = %self.options.strategy,
            "training attribute dissimilarities"
        );

        let train_one = |&index: &usize| {
            (
                index,
                self.train_attribute(dataset, index, &candidates, &evaluator),
            )
        };
        let outcomes: BTreeMap<usize, AttributeOutcome> = if self.options.parallel {
            indices.par_iter().map(train_one).collect()
        } else {
            indices.iter().map(train_one).collect()
        };

        Ok(TrainedModel::new(outcomes))
    }

    fn train_attribute(
        &self,
        dataset: &Dataset,
        index: usize,
        candidates: &[Candidate],
        evaluator: &ClassifierEvaluator,
    ) -> AttributeOutcome {
        let header = dataset.header();
        let name = header
            .attribute_at_index(index)
            .map(|a| a.name())
            .unwrap_or_default();
        let Some(nominal) = header.nominal_at_index(index) else {
            debug!(attribute = %name, "numeric attribute is not modeled");
            return AttributeOutcome::Excluded(ExclusionReason::NotNominal);
        };

        let stats = dataset.attribute_stats(index);
        if let Err(reason) = check_eligibility(&nominal.values, &stats, self.options.max_values) {
            info!(attribute = %name, %reason, "attribute has weight 0");
            return AttributeOutcome::Excluded(reason);
        }

        let working = dataset.with_class_index(Some(index));
        let budget = self.options.time_budget_secs.map(Duration::from_secs);
        let started = Instant::now();
        let mut results: Vec<ClassifierResult> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if budget.is_some_and(|b| started.elapsed() > b) {
                warn!(
                    attribute = %name,
                    skipped = candidate.name(),
                    "time budget exceeded, skipping remaining classifiers"
                );
                break;
            }
            match evaluator.evaluate(&working, candidate) {
                Ok(result) => results.push(result),
                Err(e) => warn!(attribute = %name, classifier = candidate.name(), error = %e, "classifier excluded"),
            }
        }

        let Some(best) = self.select(&results) else {
            info!(attribute = %name, "no usable classifier, attribute has weight 0");
            return AttributeOutcome::Excluded(ExclusionReason::NoUsableClassifier);
        };

        let dissimilarity = self.dissimilarity_matrix(best.confusion_matrix.rows());
        let weight = self.weight_of(best);
        info!(
            attribute = %name,
            classifier = %best.classifier_name,
            auc = best.auc,
            kappa = best.kappa,
            weight,
            "attribute trained"
        );

        let labels = &nominal.values;
        let table: HashMap<String, HashMap<String, f64>> = labels
            .iter()
            .enumerate()
            .map(|(i, first)| {
                let row = labels
                    .iter()
                    .enumerate()
                    .map(|(j, second)| {
                        let d = dissimilarity
                            .get(i)
                            .and_then(|r| r.get(j))
                            .copied()
                            .unwrap_or(1.0);
                        (second.clone(), d)
                    })
                    .collect();
                (first.clone(), row)
            })
            .collect();

        AttributeOutcome::Modeled(PerAttributeModel {
            weight,
            dissimilarity: table,
            classifier_name: best.classifier_name.clone(),
            auc: best.auc,
            kappa: best.kappa,
        })
    }

    /// Highest score wins; the earliest candidate wins ties.
    fn select<'a>(&self, results: &'a [ClassifierResult]) -> Option<&'a ClassifierResult> {
        let score = |r: &ClassifierResult| match self.options.decide_weight_by {
            SelectionScore::Auc => r.auc,
            SelectionScore::Kappa => r.kappa,
        };
        results.iter().fold(None, |best, r| match best {
            Some(b) if score(r) <= score(b) => Some(b),
            _ => Some(r),
        })
    }

    fn dissimilarity_matrix(&self, confusion: &[Vec<f64>]) -> Vec<Vec<f64>> {
        let similarity = normalize_rows(&confusion.to_vec());
        let mut similarity = self.options.strategy.apply(&similarity);
        if self.options.symmetric {
            similarity = symmetrize(&similarity);
        }
        let dissimilarity = complement(&similarity);
        if self.options.normalize_dissimilarity {
            normalize_rows(&dissimilarity)
        } else {
            dissimilarity
        }
    }

    fn weight_of(&self, result: &ClassifierResult) -> f64 {
        let raw = match self.options.multiply_weight_by {
            WeightSource::Auc => result.auc,
            WeightSource::Kappa => result.kappa,
            WeightSource::Uniform => 1.0,
        };
        if raw.is_finite() { raw.clamp(0.0, 1.0) } else { 0.0 }
    }
}
