use crate::core::attributes::NominalAttribute;
use std::any::Any;
use std::sync::Arc;

pub trait Attribute: Any + Send + Sync {
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn arff_representation(&self) -> String;

    /// Number of declared labels; `0` for attributes without a label set.
    fn num_values(&self) -> usize {
        0
    }

    fn as_nominal(&self) -> Option<&NominalAttribute> {
        self.as_any().downcast_ref::<NominalAttribute>()
    }

    fn is_nominal(&self) -> bool {
        self.as_nominal().is_some()
    }
}

pub type AttributeRef = Arc<dyn Attribute>;
