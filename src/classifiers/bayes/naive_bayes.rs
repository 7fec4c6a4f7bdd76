use crate::classifiers::Classifier;
use crate::classifiers::attribute_class_observers::{
    AttributeClassObserver, GaussianNumericAttributeClassObserver, NominalAttributeClassObserver,
};
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

/// Naive Bayes over nominal (Laplace-smoothed counts) and numeric (per-class
/// Gaussian) attributes.
#[derive(Default)]
pub struct NaiveBayes {
    observed_class_distribution: Vec<f64>,
    attribute_observers: Vec<Option<Box<dyn AttributeClassObserver>>>,
    header: Option<Arc<InstanceHeader>>,
}

impl NaiveBayes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Posterior class distribution, computed in log space and normalized to
    /// sum to one. Classes never observed get a zero vote. Returns an empty
    /// vector when no class has been observed at all.
    pub fn do_naive_bayes_prediction(
        instance: &dyn Instance,
        observed_class_distribution: &[f64],
        attribute_observers: &[Option<Box<dyn AttributeClassObserver>>],
    ) -> Vec<f64> {
        let observed_sum: f64 = observed_class_distribution.iter().sum();
        if observed_sum <= 0.0 {
            return Vec::new();
        }

        let mut log_votes = vec![f64::NEG_INFINITY; observed_class_distribution.len()];
        for (class_index, &class_weight) in observed_class_distribution.iter().enumerate() {
            if class_weight <= 0.0 {
                continue;
            }
            let mut log_vote = (class_weight / observed_sum).ln();
            for (attribute_index, observer) in attribute_observers.iter().enumerate() {
                let Some(observer) = observer else {
                    continue;
                };
                let Some(value) = instance.value_at_index(attribute_index) else {
                    continue;
                };
                if let Some(p) =
                    observer.probability_of_attribute_value_given_class(value, class_index)
                {
                    log_vote += p.max(f64::MIN_POSITIVE).ln();
                }
            }
            log_votes[class_index] = log_vote;
        }

        let max = log_votes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mut votes: Vec<f64> = log_votes
            .iter()
            .map(|&lv| if lv.is_finite() { (lv - max).exp() } else { 0.0 })
            .collect();
        let sum: f64 = votes.iter().sum();
        if sum > 0.0 {
            votes.iter_mut().for_each(|v| *v /= sum);
        }
        votes
    }
}

impl Classifier for NaiveBayes {
    fn name(&self) -> &'static str {
        "naive-bayes"
    }

    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        Self::do_naive_bayes_prediction(
            instance,
            &self.observed_class_distribution,
            &self.attribute_observers,
        )
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.observed_class_distribution = vec![0.0; header.number_of_classes()];
        self.attribute_observers = (0..header.number_of_attributes())
            .map(|index| {
                if Some(index) == header.class_index() {
                    return None;
                }
                let attribute = header.attribute_at_index(index)?;
                let observer: Box<dyn AttributeClassObserver> = match attribute.as_nominal() {
                    Some(nominal) => {
                        Box::new(NominalAttributeClassObserver::new(nominal.values.len()))
                    }
                    None => Box::new(GaussianNumericAttributeClassObserver::new()),
                };
                Some(observer)
            })
            .collect();
        self.header = Some(header);
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) {
        if instance.is_class_missing() {
            return;
        }
        let Some(class_value) = instance.class_value() else {
            return;
        };
        let class_index = class_value as usize;
        let weight = instance.weight();
        if class_index >= self.observed_class_distribution.len() {
            self.observed_class_distribution.resize(class_index + 1, 0.0);
        }
        self.observed_class_distribution[class_index] += weight;

        for (attribute_index, observer) in self.attribute_observers.iter_mut().enumerate() {
            if let (Some(observer), Some(value)) =
                (observer.as_mut(), instance.value_at_index(attribute_index))
            {
                observer.observe_attribute_class(value, class_index, weight);
            }
        }
    }
}
