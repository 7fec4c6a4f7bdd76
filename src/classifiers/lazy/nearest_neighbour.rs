use crate::classifiers::Classifier;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use std::sync::Arc;

struct StoredInstance {
    values: Vec<f64>,
    class_index: usize,
}

/// One-nearest-neighbour classifier.
///
/// Nominal attributes compare by overlap, numeric ones by their difference
/// scaled to the range seen in training. A missing value on either side
/// counts as a full mismatch. The earliest stored instance wins ties.
#[derive(Default)]
pub struct NearestNeighbour {
    stored: Vec<StoredInstance>,
    numeric_ranges: Vec<Option<(f64, f64)>>,
    nominal: Vec<bool>,
    class_attribute: Option<usize>,
    num_classes: usize,
}

impl NearestNeighbour {
    pub fn new() -> Self {
        Self::default()
    }

    fn attribute_difference(&self, index: usize, a: f64, b: f64) -> f64 {
        if a.is_nan() || b.is_nan() {
            return 1.0;
        }
        if self.nominal.get(index).copied().unwrap_or(true) {
            return if a == b { 0.0 } else { 1.0 };
        }
        match self.numeric_ranges.get(index).copied().flatten() {
            Some((lo, hi)) if hi > lo => ((a - b).abs() / (hi - lo)).min(1.0),
            _ => {
                if a == b {
                    0.0
                } else {
                    1.0
                }
            }
        }
    }

    fn squared_distance(&self, query: &[f64], stored: &[f64]) -> f64 {
        query
            .iter()
            .zip(stored)
            .enumerate()
            .filter(|(index, _)| Some(*index) != self.class_attribute)
            .map(|(index, (&a, &b))| {
                let d = self.attribute_difference(index, a, b);
                d * d
            })
            .sum()
    }
}

impl Classifier for NearestNeighbour {
    fn name(&self) -> &'static str {
        "nearest-neighbour"
    }

    fn get_votes_for_instance(&self, instance: &dyn Instance) -> Vec<f64> {
        let query = instance.to_vec();
        let mut best: Option<(f64, usize)> = None;
        for stored in &self.stored {
            let d = self.squared_distance(&query, &stored.values);
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, stored.class_index));
            }
        }
        match best {
            Some((_, class_index)) => {
                let mut votes = vec![0.0; self.num_classes.max(class_index + 1)];
                votes[class_index] = 1.0;
                votes
            }
            None => Vec::new(),
        }
    }

    fn set_model_context(&mut self, header: Arc<InstanceHeader>) {
        self.stored.clear();
        self.num_classes = header.number_of_classes();
        self.class_attribute = header.class_index();
        self.nominal = (0..header.number_of_attributes())
            .map(|i| header.nominal_at_index(i).is_some())
            .collect();
        self.numeric_ranges = vec![None; header.number_of_attributes()];
    }

    fn train_on_instance(&mut self, instance: &dyn Instance) {
        if instance.is_class_missing() {
            return;
        }
        let Some(class_value) = instance.class_value() else {
            return;
        };
        let values = instance.to_vec();
        if self.numeric_ranges.len() < values.len() {
            self.numeric_ranges.resize(values.len(), None);
        }
        for (index, &v) in values.iter().enumerate() {
            if v.is_nan() || self.nominal.get(index).copied().unwrap_or(false) {
                continue;
            }
            let range = &mut self.numeric_ranges[index];
            *range = Some(match *range {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        self.stored.push(StoredInstance {
            values,
            class_index: class_value as usize,
        });
    }
}
