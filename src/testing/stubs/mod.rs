pub mod oracle_classifier;
pub mod silent_classifier;
pub mod train_spy_classifier;

pub use oracle_classifier::OracleClassifier;
pub use silent_classifier::SilentClassifier;
pub use train_spy_classifier::{TrainSpyClassifier, TrainSpyHandle};
