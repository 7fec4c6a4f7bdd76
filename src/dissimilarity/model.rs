use crate::dissimilarity::eligibility::ExclusionReason;
use std::collections::{BTreeMap, HashMap};

/// Trained weight and value-pair dissimilarity table of one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct PerAttributeModel {
    pub weight: f64,
    /// `label → label → dissimilarity`, every entry in `[0, 1]`.
    pub dissimilarity: HashMap<String, HashMap<String, f64>>,
    /// Classifier that won the selection.
    pub classifier_name: String,
    pub auc: f64,
    pub kappa: f64,
}

impl PerAttributeModel {
    pub fn dissimilarity(&self, first: &str, second: &str) -> Option<f64> {
        self.dissimilarity.get(first)?.get(second).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.dissimilarity.keys().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeOutcome {
    Modeled(PerAttributeModel),
    Excluded(ExclusionReason),
}

/// Result of training every attribute of a dataset. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainedModel {
    outcomes: BTreeMap<usize, AttributeOutcome>,
}

impl TrainedModel {
    pub fn new(outcomes: BTreeMap<usize, AttributeOutcome>) -> Self {
        Self { outcomes }
    }

    /// `None` for attributes that were never trained (e.g. the class).
    pub fn outcome(&self, index: usize) -> Option<&AttributeOutcome> {
        self.outcomes.get(&index)
    }

    pub fn model(&self, index: usize) -> Option<&PerAttributeModel> {
        match self.outcomes.get(&index) {
            Some(AttributeOutcome::Modeled(m)) => Some(m),
            _ => None,
        }
    }

    /// Excluded attributes weigh 0; `None` if the attribute was not trained.
    pub fn weight(&self, index: usize) -> Option<f64> {
        self.outcomes.get(&index).map(|o| match o {
            AttributeOutcome::Modeled(m) => m.weight,
            AttributeOutcome::Excluded(_) => 0.0,
        })
    }

    /// Winning classifier per modeled attribute, by ascending index.
    pub fn winners(&self) -> impl Iterator<Item = (usize, &str)> {
        self.outcomes.iter().filter_map(|(i, o)| match o {
            AttributeOutcome::Modeled(m) => Some((*i, m.classifier_name.as_str())),
            AttributeOutcome::Excluded(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &AttributeOutcome)> {
        self.outcomes.iter().map(|(i, o)| (*i, o))
    }
}
