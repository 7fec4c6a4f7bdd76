use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

/// Shared view of how many instances every spy built from one handle saw.
#[derive(Clone)]
pub struct TrainSpyHandle(Arc<AtomicU64>);

impl TrainSpyHandle {
    pub fn count(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Counts training calls and always votes for the first class.
pub struct TrainSpyClassifier {
    count: Arc<AtomicU64>,
    num_classes: usize,
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let counter = Arc::new(AtomicU64::new(0));
        (
            Self {
                count: counter.clone(),
                num_classes: 2,
            },
            TrainSpyHandle(counter),
        )
    }

    /// Another spy reporting to the same counter.
    pub fn sharing(handle: &TrainSpyHandle) -> Self {
        Self {
            count: Arc::clone(&handle.0),
            num_classes: 2,
        }
    }
}

impl Classifier for TrainSpyClassifier {
    fn name(&self) -> &'static str {
        "train-spy"
    }

    fn get_votes_for_instance(&self, _inst: &dyn Instance) -> Vec<f64> {
        let mut v = vec![0.0; self.num_classes.max(1)];
        v[0] = 1.0;
        v
    }

    fn set_model_context(&mut self, h: Arc<InstanceHeader>) {
        self.num_classes = h.number_of_classes();
    }

    fn train_on_instance(&mut self, _inst: &dyn Instance) {
        self.count.fetch_add(1, Ordering::Relaxed);
    }
}
