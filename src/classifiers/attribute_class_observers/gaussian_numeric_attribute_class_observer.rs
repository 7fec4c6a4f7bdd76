use crate::classifiers::attribute_class_observers::AttributeClassObserver;
use crate::core::estimators::GaussianEstimator;

/// Per-class normal estimate of a numeric attribute.
#[derive(Default)]
pub struct GaussianNumericAttributeClassObserver {
    estimators_per_class: Vec<Option<GaussianEstimator>>,
}

impl GaussianNumericAttributeClassObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AttributeClassObserver for GaussianNumericAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64) {
        if att_val.is_nan() || !weight.is_finite() || weight <= 0.0 {
            return;
        }
        if class_val >= self.estimators_per_class.len() {
            self.estimators_per_class.resize_with(class_val + 1, || None);
        }
        self.estimators_per_class[class_val]
            .get_or_insert_with(GaussianEstimator::new)
            .add_observation(att_val, weight);
    }

    fn probability_of_attribute_value_given_class(
        &self,
        att_val: f64,
        class_val: usize,
    ) -> Option<f64> {
        if att_val.is_nan() {
            return None;
        }
        match self.estimators_per_class.get(class_val) {
            Some(Some(est)) => Some(est.probability_density(att_val)),
            _ => None,
        }
    }
}
