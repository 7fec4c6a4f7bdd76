use crate::classifiers::attribute_class_observers::AttributeClassObserver;

/// Label counts per class with Laplace-smoothed conditional probabilities.
#[derive(Default)]
pub struct NominalAttributeClassObserver {
    total_weight_observed: f64,
    missing_weight_observed: f64,
    attribute_value_distribution_per_class: Vec<Vec<f64>>,
    num_values: usize,
}

impl NominalAttributeClassObserver {
    /// `num_values` is the number of declared labels, used as the smoothing
    /// denominator even for labels never observed with a class.
    pub fn new(num_values: usize) -> NominalAttributeClassObserver {
        NominalAttributeClassObserver {
            num_values,
            ..Default::default()
        }
    }

    #[inline]
    fn ensure_value(&mut self, class_val: usize, att_val_int: usize) {
        if class_val >= self.attribute_value_distribution_per_class.len() {
            self.attribute_value_distribution_per_class
                .resize_with(class_val + 1, Vec::new);
        }
        let row = &mut self.attribute_value_distribution_per_class[class_val];
        if att_val_int >= row.len() {
            row.resize(att_val_int + 1, 0.0);
        }
    }

    pub fn total_weight_observed(&self) -> f64 {
        self.total_weight_observed
    }

    pub fn missing_weight_observed(&self) -> f64 {
        self.missing_weight_observed
    }
}

impl AttributeClassObserver for NominalAttributeClassObserver {
    fn observe_attribute_class(&mut self, att_val: f64, class_val: usize, weight: f64) {
        if att_val.is_nan() {
            self.missing_weight_observed += weight;
        } else {
            let att_val_int = att_val as usize;
            self.ensure_value(class_val, att_val_int);
            self.attribute_value_distribution_per_class[class_val][att_val_int] += weight;
        }
        self.total_weight_observed += weight;
    }

    fn probability_of_attribute_value_given_class(
        &self,
        att_val: f64,
        class_val: usize,
    ) -> Option<f64> {
        if att_val.is_nan() {
            return None;
        }
        let att_val_int = att_val as usize;
        let row = self.attribute_value_distribution_per_class.get(class_val);
        let count = row
            .and_then(|r| r.get(att_val_int))
            .copied()
            .unwrap_or(0.0);
        let sum: f64 = row.map(|r| r.iter().sum()).unwrap_or(0.0);
        let k = self
            .num_values
            .max(row.map(Vec::len).unwrap_or(0))
            .max(att_val_int + 1) as f64;
        Some((count + 1.0) / (sum + k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12
    }

    #[test]
    fn laplace_probabilities_sum_to_one() {
        let mut obs = NominalAttributeClassObserver::new(2);
        for v in [0.0, 0.0, 0.0, 1.0] {
            obs.observe_attribute_class(v, 0, 1.0);
        }
        let p0 = obs.probability_of_attribute_value_given_class(0.0, 0).unwrap();
        let p1 = obs.probability_of_attribute_value_given_class(1.0, 0).unwrap();
        assert!(approx_eq(p0, 4.0 / 6.0));
        assert!(approx_eq(p1, 2.0 / 6.0));
        assert!(approx_eq(p0 + p1, 1.0));
    }

    #[test]
    fn unseen_class_is_uniform_over_declared_labels() {
        let obs = NominalAttributeClassObserver::new(4);
        let p = obs.probability_of_attribute_value_given_class(2.0, 1).unwrap();
        assert!(approx_eq(p, 0.25));
    }

    #[test]
    fn missing_values_only_count_towards_totals() {
        let mut obs = NominalAttributeClassObserver::new(3);
        obs.observe_attribute_class(f64::NAN, 0, 2.5);
        obs.observe_attribute_class(2.0, 0, 1.5);
        assert!(approx_eq(obs.missing_weight_observed(), 2.5));
        assert!(approx_eq(obs.total_weight_observed(), 4.0));
        assert!(obs.probability_of_attribute_value_given_class(f64::NAN, 0).is_none());
        let p = obs.probability_of_attribute_value_given_class(2.0, 0).unwrap();
        assert!(approx_eq(p, 2.5 / 4.5));
    }
}
