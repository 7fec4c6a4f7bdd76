use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

/// Predicts the observed class distribution regardless of the instance.
#[derive(Default)]
pub struct MajorityClass {
    observed_class_distribution: Vec<f64>,
}

impl MajorityClass {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Classifier for MajorityClass {
    fn name(&self) -> &'static str {
        "majority-class"
    }

    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Vec<f64> {
        let sum: f64 = self.observed_class_distribution.iter().sum();
        if sum <= 0.0 {
            return Vec::new();
        }
        self.observed_class_distribution
            .iter()
            .map(|w| w / sum)
            .collect()
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.observed_class_distribution = vec![0.0; header.number_of_classes()];
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) {
        if instance.is_class_missing() {
            return;
        }
        if let Some(class_value) = instance.class_value() {
            let class_index = class_value as usize;
            if class_index >= self.observed_class_distribution.len() {
                self.observed_class_distribution.resize(class_index + 1, 0.0);
            }
            self.observed_class_distribution[class_index] += instance.weight();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute};
    use crate::core::instances::DenseInstance;

    #[test]
    fn votes_follow_class_frequencies() {
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::from_labels("x", &["a", "b"])),
            Arc::new(NominalAttribute::from_labels("y", &["p", "q", "r"])),
        ];
        let h = Arc::new(InstanceHeader::new("m".into(), attributes, Some(1)));
        let mut mc = MajorityClass::new();
        mc.set_model_context(Arc::clone(&h));

        let unlabeled = DenseInstance::from_labels(Arc::clone(&h), &["a", "?"]);
        assert!(mc.get_votes_for_instance(&unlabeled).is_empty());

        for r in [["a", "p"], ["b", "p"], ["a", "q"], ["b", "?"]] {
            mc.train_on_instance(&DenseInstance::from_labels(Arc::clone(&h), &r));
        }
        let votes = mc.get_votes_for_instance(&unlabeled);
        assert_eq!(votes.len(), 3);
        assert!((votes[0] - 2.0 / 3.0).abs() < 1e-12);
        assert!((votes[1] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(votes[2], 0.0);
    }
}
