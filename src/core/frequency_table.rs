use crate::core::dataset::Dataset;
use std::collections::HashMap;

/// Occurrence counts of every value per attribute over one dataset snapshot.
///
/// The class attribute, if any, is not counted. Missing values are counted
/// under [`MISSING_VALUE`](crate::core::instances::MISSING_VALUE).
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, HashMap<String, usize>>,
    total_instances: usize,
}

impl FrequencyTable {
    pub fn from_dataset(dataset: &Dataset) -> FrequencyTable {
        let header = dataset.header();
        let mut counts: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for index in 0..header.number_of_attributes() {
            if Some(index) == header.class_index() {
                continue;
            }
            let Some(attribute) = header.attribute_at_index(index) else {
                continue;
            };
            let per_value = counts.entry(attribute.name()).or_default();
            for instance in dataset.iter() {
                if let Some(value) = instance.string_value(index) {
                    *per_value.entry(value).or_insert(0) += 1;
                }
            }
        }

        FrequencyTable {
            counts,
            total_instances: dataset.len(),
        }
    }

    /// Occurrences of `value`; `0` for unseen values or unknown attributes.
    pub fn frequency(&self, attribute_name: &str, value: &str) -> usize {
        self.counts
            .get(attribute_name)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_instances(&self) -> usize {
        self.total_instances
    }

    pub fn contains_attribute(&self, attribute_name: &str) -> bool {
        self.counts.contains_key(attribute_name)
    }
}
