use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

/// Never produces a usable vote.
#[derive(Default)]
pub struct SilentClassifier;

impl Classifier for SilentClassifier {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn get_votes_for_instance(&self, _instance: &dyn Instance) -> Vec<f64> {
        Vec::new()
    }

    fn set_model_context(&mut self, _header: Arc<InstanceHeader>) {}

    fn train_on_instance(&mut self, _instance: &dyn Instance) {}
}
