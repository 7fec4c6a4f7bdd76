use crate::classifiers::Classifier;
use crate::classifiers::bayes::NaiveBayes;
use crate::classifiers::lazy::NearestNeighbour;
use crate::classifiers::rules::MajorityClass;
use std::fmt;
use std::sync::Arc;

/// Builds a fresh, untrained classifier. Called once per fold.
pub type ClassifierFactory = Arc<dyn Fn() -> Box<dyn Classifier> + Send + Sync>;

/// A named classifier factory competing during dissimilarity training.
#[derive(Clone)]
pub struct Candidate {
    name: String,
    factory: ClassifierFactory,
}

impl Candidate {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Box<dyn Classifier> + Send + Sync + 'static,
    {
        let name = factory().name().to_string();
        Self {
            name,
            factory: Arc::new(factory),
        }
    }

    pub fn named<N: Into<String>>(name: N, factory: ClassifierFactory) -> Self {
        Self {
            name: name.into(),
            factory,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn build(&self) -> Box<dyn Classifier> {
        (self.factory)()
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate").field("name", &self.name).finish()
    }
}

/// Candidates tried for every attribute, in selection order.
///
/// The nearest-neighbour classifier keeps every training instance, so it is
/// only included for datasets smaller than `lazy_classifier_limit`.
pub fn default_candidates(num_instances: usize, lazy_classifier_limit: usize) -> Vec<Candidate> {
    let mut candidates = vec![
        Candidate::new(|| Box::new(NaiveBayes::new()) as Box<dyn Classifier>),
        Candidate::new(|| Box::new(MajorityClass::new()) as Box<dyn Classifier>),
    ];
    if num_instances < lazy_classifier_limit {
        candidates.push(Candidate::new(
            || Box::new(NearestNeighbour::new()) as Box<dyn Classifier>,
        ));
    }
    candidates
}
