pub mod attribute_class_observers;
pub mod bayes;
pub mod classifier;
pub mod factory;
pub mod lazy;
pub mod rules;

pub use classifier::Classifier;
pub use factory::{Candidate, ClassifierFactory, default_candidates};
