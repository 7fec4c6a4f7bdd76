use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

/// Black-box learner used to predict one attribute from the others.
///
/// The class attribute is the one designated by the header passed to
/// [`set_model_context`](Classifier::set_model_context).
pub trait Classifier {
    fn name(&self) -> &'static str;

    /// One score per class label. An empty vector (or one without any finite
    /// score) means the classifier cannot predict this instance.
    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64>;

    fn set_model_context(&mut self, header: Arc<InstanceHeader>);

    fn train_on_instance(&mut self, instance: &dyn Instance);
}
