use crate::core::dataset::Dataset;
use crate::core::frequency_table::FrequencyTable;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::MISSING_VALUE;
use std::sync::Arc;

/// Value probabilities derived from a [`FrequencyTable`], addressed by
/// attribute index.
#[derive(Clone)]
pub struct ProbabilityModel {
    header: Arc<InstanceHeader>,
    frequencies: FrequencyTable,
}

impl ProbabilityModel {
    pub fn new(header: Arc<InstanceHeader>, frequencies: FrequencyTable) -> Self {
        Self {
            header,
            frequencies,
        }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.header_arc(), FrequencyTable::from_dataset(dataset))
    }

    pub fn header(&self) -> &InstanceHeader {
        &self.header
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn total_instances(&self) -> usize {
        self.frequencies.total_instances()
    }

    pub fn frequency(&self, index: usize, value: &str) -> usize {
        self.header
            .attribute_at_index(index)
            .map(|a| self.frequencies.frequency(&a.name(), value))
            .unwrap_or(0)
    }

    /// Probability that a record holds `value`.
    pub fn probability_a(&self, index: usize, value: &str) -> f64 {
        let total = self.total_instances();
        if total == 0 {
            return 0.0;
        }
        self.frequency(index, value) as f64 / total as f64
    }

    /// Probability that two distinct records both hold `value`.
    pub fn probability_b(&self, index: usize, value: &str) -> f64 {
        let total = self.total_instances() as f64;
        if total <= 1.0 {
            return 0.0;
        }
        let freq = self.frequency(index, value) as f64;
        (freq * (freq - 1.0)) / (total * (total - 1.0))
    }

    /// Distinct non-missing labels observed for a nominal attribute.
    pub fn distinct_count(&self, index: usize) -> usize {
        self.header
            .nominal_at_index(index)
            .map(|n| {
                n.values
                    .iter()
                    .filter(|v| v.as_str() != MISSING_VALUE && self.frequency(index, v) > 0)
                    .count()
            })
            .unwrap_or(0)
    }

    /// Declared labels of a nominal attribute.
    pub fn value_count(&self, index: usize) -> usize {
        self.header
            .attribute_at_index(index)
            .map(|a| a.num_values())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::weather_nominal;

    const EPS: f64 = 1e-12;

    #[test]
    fn probability_a_is_relative_frequency() {
        let model = ProbabilityModel::from_dataset(&weather_nominal());
        assert!((model.probability_a(3, "FALSE") - 8.0 / 14.0).abs() < EPS);
        assert_eq!(model.probability_a(3, "maybe"), 0.0);
    }

    #[test]
    fn probability_b_draws_two_distinct_records() {
        let model = ProbabilityModel::from_dataset(&weather_nominal());
        let expected = (6.0 * 5.0) / (14.0 * 13.0);
        assert!((model.probability_b(3, "TRUE") - expected).abs() < EPS);
    }

    #[test]
    fn counts_distinct_and_declared_values() {
        let model = ProbabilityModel::from_dataset(&weather_nominal());
        assert_eq!(model.distinct_count(0), 3);
        assert_eq!(model.distinct_count(3), 2);
        assert_eq!(model.value_count(1), 3);
        assert_eq!(model.value_count(42), 0);
    }
}
