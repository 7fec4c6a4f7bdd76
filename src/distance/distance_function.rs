use crate::classifiers::Candidate;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{Instance, MISSING_VALUE};
use crate::core::probability_model::ProbabilityModel;
use crate::dissimilarity::{AttributeDissimilarityTrainer, LearningOptions, TrainedModel};
use crate::distance::attribute_range::parse_attribute_range;
use crate::distance::stats::DistanceStats;
use crate::error::{DistanceError, Result};
use crate::measures::{
    Aggregation, DifferenceStrategy, LearnedDifference, MeasureKind, ModifiedDifference,
    WeightAdjustment,
};
use std::sync::Arc;
use tracing::info;

/// Unbound description of a distance: which measure, how to learn it and
/// which attributes take part.
#[derive(Clone)]
pub struct DistanceFunction {
    kind: MeasureKind,
    options: LearningOptions,
    candidates: Option<Vec<Candidate>>,
}

impl DistanceFunction {
    pub fn new(kind: MeasureKind, options: LearningOptions) -> Self {
        Self {
            kind,
            options,
            candidates: None,
        }
    }

    /// Replaces the default candidate classifiers of the learning measures.
    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    pub fn with_attribute_range(mut self, range: &str) -> Self {
        self.options.attribute_range = range.to_string();
        self
    }

    pub fn kind(&self) -> MeasureKind {
        self.kind
    }

    pub fn options(&self) -> &LearningOptions {
        &self.options
    }

    /// Builds every table the measure needs from `dataset`.
    pub fn bind(&self, dataset: &Dataset) -> Result<BoundDistance> {
        if dataset.is_empty() {
            return Err(DistanceError::EmptyDataset);
        }
        let header = dataset.header_arc();
        let num_attributes = header.number_of_attributes();
        let class_index = header.class_index();
        let active: Vec<bool> = parse_attribute_range(&self.options.attribute_range, num_attributes)?
            .into_iter()
            .enumerate()
            .map(|(i, on)| on && Some(i) != class_index)
            .collect();
        let considered: Vec<usize> = active
            .iter()
            .enumerate()
            .filter_map(|(i, &on)| on.then_some(i))
            .collect();
        let numeric_ranges = (0..num_attributes)
            .map(|i| match header.nominal_at_index(i) {
                Some(_) => None,
                None => dataset.numeric_range(i),
            })
            .collect();

        let probabilities = Arc::new(ProbabilityModel::from_dataset(dataset));
        let (strategy, trained): (Box<dyn DifferenceStrategy>, Option<Arc<TrainedModel>>) =
            match self.kind {
                MeasureKind::Statistical(base) => (base.build(probabilities), None),
                MeasureKind::LearningBased => {
                    let model = Arc::new(self.train(dataset)?);
                    let adjustment = WeightAdjustment::new(
                        self.options.low_weight_policy,
                        self.options.multiply_style,
                    );
                    let strategy =
                        LearnedDifference::new(Arc::clone(&header), Arc::clone(&model), adjustment);
                    (Box::new(strategy), Some(model))
                }
                MeasureKind::Modified { base, adjustment } => {
                    let model = Arc::new(self.train(dataset)?);
                    let strategy =
                        ModifiedDifference::new(base.build(probabilities), Arc::clone(&model), adjustment);
                    (Box::new(strategy), Some(model))
                }
            };

        info!(
            relation = header.relation_name(),
            measure = strategy.name(),
            active = considered.len(),
            instances = dataset.len(),
            "distance bound"
        );

        let declared_values = header.total_declared_values();
        Ok(BoundDistance {
            definition: self.clone(),
            header,
            strategy,
            trained,
            active,
            considered,
            numeric_ranges,
            declared_values,
        })
    }

    /// Options handed to the trainer. Modified measures always weigh
    /// attributes by kappa over untouched confusion rows.
    pub fn training_options(&self) -> LearningOptions {
        match self.kind {
            MeasureKind::Modified { .. } => self.options.for_modified(),
            _ => self.options.clone(),
        }
    }

    fn train(&self, dataset: &Dataset) -> Result<TrainedModel> {
        let options = self.training_options();
        let trainer = match &self.candidates {
            Some(c) => AttributeDissimilarityTrainer::with_candidates(options, c.clone()),
            None => AttributeDissimilarityTrainer::new(options),
        };
        trainer.train(dataset)
    }
}

/// A distance bound to one dataset. Read-only and shareable across threads.
pub struct BoundDistance {
    definition: DistanceFunction,
    header: Arc<InstanceHeader>,
    strategy: Box<dyn DifferenceStrategy>,
    trained: Option<Arc<TrainedModel>>,
    active: Vec<bool>,
    considered: Vec<usize>,
    numeric_ranges: Vec<Option<(f64, f64)>>,
    declared_values: usize,
}

impl BoundDistance {
    pub fn header(&self) -> &InstanceHeader {
        &self.header
    }

    /// The learned model, for the measures that train one.
    pub fn trained_model(&self) -> Option<&TrainedModel> {
        self.trained.as_deref()
    }

    pub fn measure_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Attribute indices taking part in the distance.
    pub fn considered(&self) -> &[usize] {
        &self.considered
    }

    /// Same definition bound to `dataset`; nothing is shared with `self`.
    pub fn rebind(&self, dataset: &Dataset) -> Result<BoundDistance> {
        self.definition.bind(dataset)
    }

    pub fn distance(&self, first: &dyn Instance, second: &dyn Instance) -> Result<f64> {
        self.distance_with_cutoff(first, second, None, None)
    }

    /// Distance between two records, `+∞` as soon as the running total
    /// exceeds `cutoff`.
    pub fn distance_with_cutoff(
        &self,
        first: &dyn Instance,
        second: &dyn Instance,
        cutoff: Option<f64>,
        mut stats: Option<&mut DistanceStats>,
    ) -> Result<f64> {
        let n = self.header.number_of_attributes();
        for instance in [first, second] {
            if instance.number_of_attributes() != n {
                return Err(DistanceError::HeaderMismatch(format!(
                    "instance has {} attributes, distance is bound to {n}",
                    instance.number_of_attributes()
                )));
            }
        }
        if let Some(s) = stats.as_deref_mut() {
            s.incr_distance_count();
        }

        let aggregation = self.strategy.aggregation();
        let pair_weight = match aggregation {
            Aggregation::PairWeighted => self.strategy.pair_weight(first, second, &self.considered),
            _ => 1.0,
        };

        let (len1, len2) = (first.num_values(), second.num_values());
        let (mut p1, mut p2) = (0, 0);
        let mut distance = 0.0;
        while p1 < len1 || p2 < len2 {
            let i1 = if p1 < len1 { first.index(p1) } else { n };
            let i2 = if p2 < len2 { second.index(p2) } else { n };
            let index = i1.min(i2);
            let a = (i1 == index).then_some(first);
            let b = (i2 == index).then_some(second);
            if a.is_some() {
                p1 += 1;
            }
            if b.is_some() {
                p2 += 1;
            }
            if !self.active.get(index).copied().unwrap_or(false) {
                continue;
            }

            let diff = self.coordinate(index, a, b)?;
            distance = self.accumulate(aggregation, distance, diff, index, pair_weight);
            if let Some(s) = stats.as_deref_mut() {
                s.incr_coord_count();
            }
            if cutoff.is_some_and(|c| distance > c) {
                if let Some(s) = stats.as_deref_mut() {
                    s.incr_pruned_count();
                }
                return Ok(f64::INFINITY);
            }
        }
        Ok(distance)
    }

    /// Difference between two values of attribute `index`, given as labels
    /// (numbers for numeric attributes). `""` marks an absent value and
    /// `"?"` a missing one.
    pub fn difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        let len = self.header.number_of_attributes();
        if index >= len {
            return Err(DistanceError::AttributeOutOfBounds { index, len });
        }
        if self.header.nominal_at_index(index).is_some() {
            return self.nominal_difference(index, first, second);
        }
        let parse = |s: &str| s.trim().parse::<f64>().unwrap_or(f64::NAN);
        Ok(self.numeric_difference(index, parse(first), parse(second)))
    }

    fn coordinate(
        &self,
        index: usize,
        first: Option<&dyn Instance>,
        second: Option<&dyn Instance>,
    ) -> Result<f64> {
        if self.header.nominal_at_index(index).is_some() {
            let label = |side: Option<&dyn Instance>| {
                side.and_then(|i| i.string_value(index)).unwrap_or_default()
            };
            return self.nominal_difference(index, &label(first), &label(second));
        }
        let value = |side: Option<&dyn Instance>| {
            side.and_then(|i| i.value_at_index(index)).unwrap_or(f64::NAN)
        };
        Ok(self.numeric_difference(index, value(first), value(second)))
    }

    fn nominal_difference(&self, index: usize, first: &str, second: &str) -> Result<f64> {
        if first == MISSING_VALUE || second == MISSING_VALUE {
            return Ok(1.0);
        }
        self.strategy.difference(index, first, second)
    }

    fn numeric_difference(&self, index: usize, first: f64, second: f64) -> f64 {
        match (first.is_nan(), second.is_nan()) {
            (true, true) => 1.0,
            (false, false) => (self.norm(index, first) - self.norm(index, second)).abs(),
            (true, false) | (false, true) => {
                let present = if first.is_nan() { second } else { first };
                let x = self.norm(index, present);
                x.max(1.0 - x)
            }
        }
    }

    /// Position of `value` within the bound dataset's range; 0 when the
    /// range is empty or degenerate.
    fn norm(&self, index: usize, value: f64) -> f64 {
        match self.numeric_ranges.get(index).copied().flatten() {
            Some((min, max)) if max > min => (value - min) / (max - min),
            _ => 0.0,
        }
    }

    fn accumulate(
        &self,
        aggregation: Aggregation,
        running: f64,
        diff: f64,
        index: usize,
        pair_weight: f64,
    ) -> f64 {
        let per_attribute = self.header.number_of_attributes().max(1) as f64;
        match aggregation {
            Aggregation::Mean => running + diff / per_attribute,
            Aggregation::Sum => running + diff,
            Aggregation::PerDeclaredValue if self.declared_values > 0 => {
                running + diff / self.declared_values as f64
            }
            Aggregation::PerDeclaredValue => running + diff / per_attribute,
            Aggregation::PairWeighted if self.header.nominal_at_index(index).is_some() => {
                running + diff * pair_weight
            }
            Aggregation::PairWeighted => running + diff / per_attribute,
        }
    }
}

impl std::fmt::Debug for BoundDistance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundDistance")
            .field("measure", &self.strategy.name())
            .field("relation", &self.header.relation_name())
            .field("considered", &self.considered)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
    use crate::core::instances::{DenseInstance, SparseInstance};
    use crate::dissimilarity::{DiagonalStrategy, WeightSource};
    use crate::measures::BaseMeasure;
    use crate::testing::dummies::{dataset_from_rows, weather_nominal};
    use crate::classifiers::Classifier;
    use crate::testing::stubs::OracleClassifier;

    const EPS: f64 = 1e-12;

    fn statistical(base: BaseMeasure) -> DistanceFunction {
        DistanceFunction::new(MeasureKind::Statistical(base), LearningOptions::default())
    }

    fn mixed() -> Dataset {
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::from_labels("color", &["red", "green"])),
            Arc::new(NumericAttribute::new("size".into())),
        ];
        let header = Arc::new(InstanceHeader::new("toys".into(), attributes, None));
        dataset_from_rows(header, &[vec!["red", "0"], vec!["green", "10"], vec!["red", "?"]])
    }

    #[test]
    fn eskin_weather_rows_differ_on_windy_only() {
        let data = weather_nominal();
        let bound = statistical(BaseMeasure::Eskin).bind(&data).unwrap();
        let d = bound.distance(data.get(0).unwrap(), data.get(1).unwrap()).unwrap();
        assert!((d - 0.1).abs() < EPS);
        assert_eq!(bound.distance(data.get(0).unwrap(), data.get(0).unwrap()).unwrap(), 0.0);
    }

    #[test]
    fn numeric_attributes_use_normalized_difference() {
        let data = mixed();
        let bound = statistical(BaseMeasure::Overlap).bind(&data).unwrap();
        let d = bound.distance(data.get(0).unwrap(), data.get(1).unwrap()).unwrap();
        assert!((d - (1.0 + 1.0) / 2.0).abs() < EPS);
        assert!((bound.difference(1, "2.5", "5").unwrap() - 0.25).abs() < EPS);
    }

    #[test]
    fn numeric_missing_rules() {
        let bound = statistical(BaseMeasure::Overlap).bind(&mixed()).unwrap();
        assert_eq!(bound.difference(1, "?", "?").unwrap(), 1.0);
        assert!((bound.difference(1, "2", "?").unwrap() - 0.8).abs() < EPS);
        assert!((bound.difference(1, "?", "7").unwrap() - 0.7).abs() < EPS);
    }

    #[test]
    fn nominal_missing_is_one() {
        let bound = statistical(BaseMeasure::Eskin).bind(&weather_nominal()).unwrap();
        assert_eq!(bound.difference(0, "?", "sunny").unwrap(), 1.0);
        assert!(matches!(
            bound.difference(9, "a", "b"),
            Err(DistanceError::AttributeOutOfBounds { index: 9, len: 5 })
        ));
    }

    #[test]
    fn lin_scales_missing_coordinate_by_floored_pair_weight() {
        let data = weather_nominal();
        let bound = statistical(BaseMeasure::Lin).bind(&data).unwrap();
        let complete = data.get(0).unwrap();
        let windy_unknown =
            DenseInstance::from_labels(data.header_arc(), &["sunny", "hot", "high", "?", "no"]);

        let information = 2.0 * (5.0f64 / 14.0).ln()
            + 2.0 * (4.0f64 / 14.0).ln()
            + 2.0 * (7.0f64 / 14.0).ln()
            + (1.0f64 / 28.0).ln()
            + (8.0f64 / 14.0).ln();
        let d = bound.distance(&windy_unknown, complete).unwrap();
        assert!((d - 1.0 / -information).abs() < EPS);
        assert_eq!(d, bound.distance(complete, &windy_unknown).unwrap());
    }

    #[test]
    fn cutoff_returns_infinity_and_counts_pruning() {
        let data = weather_nominal();
        let bound = statistical(BaseMeasure::Overlap).bind(&data).unwrap();
        let (a, b) = (data.get(0).unwrap(), data.get(13).unwrap());
        let full = bound.distance(a, b).unwrap();
        assert!(full > 0.1);

        let mut stats = DistanceStats::new();
        let pruned = bound
            .distance_with_cutoff(a, b, Some(0.1), Some(&mut stats))
            .unwrap();
        assert_eq!(pruned, f64::INFINITY);
        assert_eq!(stats.pruned(), 1);
        assert!(stats.coordinates() < 5);

        let kept = bound.distance_with_cutoff(a, b, Some(full), None).unwrap();
        assert_eq!(kept, full);
    }

    #[test]
    fn attribute_range_and_class_are_skipped() {
        let data = weather_nominal();
        let only_windy = statistical(BaseMeasure::Overlap)
            .with_attribute_range("4")
            .bind(&data)
            .unwrap();
        assert_eq!(only_windy.considered(), &[3]);
        let d = only_windy.distance(data.get(0).unwrap(), data.get(1).unwrap()).unwrap();
        assert!((d - 0.2).abs() < EPS);

        let labeled = data.with_class_index(Some(4));
        let bound = statistical(BaseMeasure::Overlap).bind(&labeled).unwrap();
        assert_eq!(bound.considered(), &[0, 1, 2, 3]);
    }

    #[test]
    fn bad_range_is_rejected_at_bind() {
        let result = statistical(BaseMeasure::Overlap)
            .with_attribute_range("7")
            .bind(&weather_nominal());
        assert!(matches!(result, Err(DistanceError::InvalidParameter(_))));
    }

    #[test]
    fn sparse_absent_values_compare_as_empty() {
        let data = weather_nominal();
        let bound = statistical(BaseMeasure::Overlap).bind(&data).unwrap();
        let header = data.header_arc();
        let a = SparseInstance::from_labels(Arc::clone(&header), &[("outlook", "sunny")]).unwrap();
        let b = SparseInstance::from_labels(Arc::clone(&header), &[("windy", "TRUE")]).unwrap();
        let d = bound.distance(&a, &b).unwrap();
        assert!((d - 2.0 / 5.0).abs() < EPS);
    }

    #[test]
    fn foreign_instances_are_rejected() {
        let data = weather_nominal();
        let bound = statistical(BaseMeasure::Overlap).bind(&data).unwrap();
        let other = Arc::new(InstanceHeader::new("x".into(), vec![], None));
        let stray = DenseInstance::new(other, vec![], 1.0);
        assert!(matches!(
            bound.distance(&stray, data.get(0).unwrap()),
            Err(DistanceError::HeaderMismatch(_))
        ));
    }

    #[test]
    fn empty_dataset_cannot_be_bound() {
        let header = weather_nominal().header_arc();
        let empty = Dataset::new(header, vec![]).unwrap();
        assert!(matches!(
            statistical(BaseMeasure::Eskin).bind(&empty),
            Err(DistanceError::EmptyDataset)
        ));
    }

    #[test]
    fn learned_measure_with_oracle_is_overlap_sum() {
        let data = weather_nominal();
        let options = LearningOptions {
            parallel: false,
            ..LearningOptions::default()
        };
        let bound = DistanceFunction::new(MeasureKind::LearningBased, options)
            .with_candidates(vec![Candidate::new(|| {
                Box::new(OracleClassifier::default()) as Box<dyn Classifier>
            })])
            .bind(&data)
            .unwrap();
        assert!(bound.trained_model().is_some());
        let d = bound.distance(data.get(0).unwrap(), data.get(1).unwrap()).unwrap();
        assert!((d - 1.0).abs() < EPS);
    }

    #[test]
    fn modified_measures_train_on_kappa() {
        let data = weather_nominal();
        let options = LearningOptions {
            parallel: false,
            ..LearningOptions::default()
        };
        let function = DistanceFunction::new(MeasureKind::modified(BaseMeasure::Gambaryan), options);
        let training = function.training_options();
        assert_eq!(training.multiply_weight_by, WeightSource::Kappa);
        assert_eq!(training.strategy, DiagonalStrategy::Untouched);

        let bound = function
            .with_candidates(vec![Candidate::new(|| {
                Box::new(OracleClassifier::default()) as Box<dyn Classifier>
            })])
            .bind(&data)
            .unwrap();
        let model = bound.trained_model().unwrap();
        assert!(!model.is_empty());
        for (_, outcome) in model.iter() {
            if let crate::dissimilarity::AttributeOutcome::Modeled(m) = outcome {
                let expected = if m.kappa.is_finite() { m.kappa.clamp(0.0, 1.0) } else { 0.0 };
                assert!((m.weight - expected).abs() < EPS);
            }
        }
    }

    #[test]
    fn learning_based_keeps_configured_options() {
        let function = DistanceFunction::new(MeasureKind::LearningBased, LearningOptions::default());
        assert_eq!(function.training_options(), LearningOptions::default());
    }

    #[test]
    fn rebind_reflects_new_data() {
        let data = mixed();
        let bound = statistical(BaseMeasure::Overlap).bind(&data).unwrap();
        let header = data.header_arc();
        let wider = dataset_from_rows(header, &[vec!["red", "0"], vec!["green", "20"]]);
        let rebound = bound.rebind(&wider).unwrap();
        assert!((rebound.difference(1, "0", "10").unwrap() - 0.5).abs() < EPS);
        assert!((bound.difference(1, "0", "10").unwrap() - 1.0).abs() < EPS);
    }
}
