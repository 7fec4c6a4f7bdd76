mod common;

use cadis::classifiers::rules::MajorityClass;
use cadis::classifiers::{Candidate, Classifier};
use cadis::dissimilarity::{
    AttributeDissimilarityTrainer, AttributeOutcome, DiagonalStrategy, LearningOptions,
    SelectionScore, WeightSource,
};
use cadis::measures::{BaseMeasure, MeasureKind};
use cadis::tasks::pairwise_distances;
use cadis::DistanceFunction;
use common::{weather, weather_repeated};

fn majority() -> Candidate {
    Candidate::new(|| Box::new(MajorityClass::new()) as Box<dyn Classifier>)
}

#[test]
fn training_is_deterministic_for_a_seed() {
    let data = weather_repeated(3);
    let options = LearningOptions {
        multiply_weight_by: WeightSource::Kappa,
        ..LearningOptions::default()
    };
    let first = AttributeDissimilarityTrainer::new(options.clone()).train(&data).unwrap();
    let second = AttributeDissimilarityTrainer::new(options.clone()).train(&data).unwrap();
    assert_eq!(first, second);

    let sequential = AttributeDissimilarityTrainer::new(LearningOptions {
        parallel: false,
        ..options
    })
    .train(&data)
    .unwrap();
    assert_eq!(first, sequential);
}

#[test]
fn every_weather_attribute_is_modeled_with_bounded_tables() {
    let model = AttributeDissimilarityTrainer::new(LearningOptions::default())
        .train(&weather_repeated(3))
        .unwrap();
    assert_eq!(model.len(), 5);
    for (index, outcome) in model.iter() {
        let AttributeOutcome::Modeled(m) = outcome else {
            panic!("attribute {index} was excluded: {outcome:?}");
        };
        assert!((0.0..=1.0).contains(&m.weight));
        for row in m.dissimilarity.values() {
            assert!(row.values().all(|d| (0.0..=1.0).contains(d)));
        }
    }
}

#[test]
fn symmetric_learned_distance_is_symmetric_and_bounded() {
    let data = weather_repeated(2);
    let options = LearningOptions {
        symmetric: true,
        ..LearningOptions::default()
    };
    let bound = DistanceFunction::new(MeasureKind::LearningBased, options)
        .bind(&data)
        .unwrap();
    let m = pairwise_distances(&bound, &data).unwrap();
    let attributes = data.number_of_attributes() as f64;
    for i in 0..m.len() {
        for j in 0..m.len() {
            assert!((m[i][j] - m[j][i]).abs() < 1e-12);
            assert!(m[i][j] >= 0.0 && m[i][j] <= attributes);
        }
    }
}

#[test]
fn one_minus_modified_measures_weigh_by_kappa() {
    let data = weather();
    let first = data.get(0).unwrap();
    let last = data.get(13).unwrap();
    for base in [
        BaseMeasure::OccurrenceFrequency,
        BaseMeasure::InverseOccurrenceFrequency,
        BaseMeasure::Gambaryan,
    ] {
        // Uniform weights would zero every OneMinus product; modified training overrides them.
        let options = LearningOptions {
            multiply_weight_by: WeightSource::Uniform,
            parallel: false,
            ..LearningOptions::default()
        };
        let bound = DistanceFunction::new(MeasureKind::modified(base), options)
            .bind(&data)
            .unwrap();
        let model = bound.trained_model().unwrap();
        for (index, outcome) in model.iter() {
            if let AttributeOutcome::Modeled(m) = outcome {
                let expected = if m.kappa.is_finite() { m.kappa.clamp(0.0, 1.0) } else { 0.0 };
                assert!((m.weight - expected).abs() < 1e-12, "{base:?} attribute {index}");
            }
        }
        let d = bound.distance(first, last).unwrap();
        assert!(d.is_finite() && d > 0.0, "{base:?} gave {d}");
    }
}

#[test]
fn flags_drive_the_pipeline() {
    let options = LearningOptions::from_flags(&["-S", "B", "-W", "K", "-t", "N", "-s"]).unwrap();
    assert_eq!(options.strategy, DiagonalStrategy::AddTwo);
    assert_eq!(options.decide_weight_by, SelectionScore::Kappa);
    let data = weather_repeated(2);
    let bound = DistanceFunction::new(MeasureKind::LearningBased, options)
        .with_candidates(vec![majority()])
        .bind(&data)
        .unwrap();
    let model = bound.trained_model().unwrap();
    for (index, name) in model.winners() {
        assert_eq!(name, "majority-class", "attribute {index}");
        let m = model.model(index).unwrap();
        assert!((m.weight - m.kappa.clamp(0.0, 1.0)).abs() < 1e-12);
        assert_eq!(m.dissimilarity("sunny", "rainy"), m.dissimilarity("rainy", "sunny"));
    }
    let d = bound.distance(data.get(0).unwrap(), data.get(5).unwrap()).unwrap();
    assert!(d.is_finite() && d >= 0.0);
}
