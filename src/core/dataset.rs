use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::error::{DistanceError, Result};
use std::sync::Arc;

/// Summary of one attribute's values over a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStats {
    /// Distinct non-missing values observed.
    pub distinct_count: usize,
    /// Occurrences per declared label (empty for numeric attributes).
    pub nominal_counts: Vec<usize>,
    pub missing_count: usize,
    pub total_count: usize,
}

/// In-memory table of instances sharing one header.
pub struct Dataset {
    header: Arc<InstanceHeader>,
    instances: Vec<Box<dyn Instance>>,
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>, instances: Vec<Box<dyn Instance>>) -> Result<Self> {
        let n = header.number_of_attributes();
        if let Some(bad) = instances
            .iter()
            .position(|i| i.number_of_attributes() != n)
        {
            return Err(DistanceError::HeaderMismatch(format!(
                "instance {bad} has {} attributes, header has {n}",
                instances[bad].number_of_attributes()
            )));
        }
        Ok(Self { header, instances })
    }

    pub fn header(&self) -> &InstanceHeader {
        &self.header
    }

    pub fn header_arc(&self) -> Arc<InstanceHeader> {
        Arc::clone(&self.header)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&dyn Instance> {
        self.instances.get(position).map(|i| i.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Instance> {
        self.instances.iter().map(|i| i.as_ref())
    }

    pub fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    /// Working copy whose header designates `class_index` as the class.
    pub fn with_class_index(&self, class_index: Option<usize>) -> Dataset {
        let header = Arc::new(self.header.with_class_index(class_index));
        let instances = self
            .instances
            .iter()
            .map(|i| i.with_header(Arc::clone(&header)))
            .collect();
        Dataset { header, instances }
    }

    pub fn attribute_stats(&self, index: usize) -> AttributeStats {
        let declared = self
            .header
            .nominal_at_index(index)
            .map(|n| n.values.len())
            .unwrap_or(0);
        let mut nominal_counts = vec![0usize; declared];
        let mut missing_count = 0;
        let mut numeric_seen: Vec<f64> = Vec::new();

        for instance in self.iter() {
            let value = instance.value_at_index(index).unwrap_or(f64::NAN);
            if value.is_nan() {
                missing_count += 1;
            } else if declared > 0 {
                if let Some(slot) = nominal_counts.get_mut(value as usize) {
                    *slot += 1;
                }
            } else {
                numeric_seen.push(value);
            }
        }

        let distinct_count = if declared > 0 {
            nominal_counts.iter().filter(|&&c| c > 0).count()
        } else {
            numeric_seen.sort_by(f64::total_cmp);
            numeric_seen.dedup();
            numeric_seen.len()
        };

        AttributeStats {
            distinct_count,
            nominal_counts,
            missing_count,
            total_count: self.len(),
        }
    }

    /// Minimum and maximum observed value, ignoring missing ones.
    pub fn numeric_range(&self, index: usize) -> Option<(f64, f64)> {
        self.iter()
            .filter_map(|i| i.value_at_index(index))
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
    use crate::core::instances::DenseInstance;

    fn dataset() -> Dataset {
        let attributes: Vec<AttributeRef> = vec![
            Arc::new(NominalAttribute::from_labels("color", &["red", "green", "blue"])),
            Arc::new(NumericAttribute::new("size".into())),
        ];
        let header = Arc::new(InstanceHeader::new("toys".into(), attributes, None));
        let rows = [["red", "1"], ["red", "4"], ["green", "?"], ["?", "2"]];
        let instances = rows
            .iter()
            .map(|r| Box::new(DenseInstance::from_labels(Arc::clone(&header), r)) as Box<dyn Instance>)
            .collect();
        Dataset::new(header, instances).unwrap()
    }

    #[test]
    fn nominal_stats_count_labels_and_missing() {
        let stats = dataset().attribute_stats(0);
        assert_eq!(stats.nominal_counts, vec![2, 1, 0]);
        assert_eq!(stats.distinct_count, 2);
        assert_eq!(stats.missing_count, 1);
        assert_eq!(stats.total_count, 4);
    }

    #[test]
    fn numeric_stats_and_range() {
        let d = dataset();
        let stats = d.attribute_stats(1);
        assert!(stats.nominal_counts.is_empty());
        assert_eq!(stats.distinct_count, 3);
        assert_eq!(d.numeric_range(1), Some((1.0, 4.0)));
    }

    #[test]
    fn with_class_index_relabels_every_instance() {
        let d = dataset().with_class_index(Some(0));
        assert_eq!(d.header().class_index(), Some(0));
        assert_eq!(d.get(2).unwrap().class_value(), Some(1.0));
        assert!(d.get(3).unwrap().is_class_missing());
    }

    #[test]
    fn mismatched_instances_are_rejected() {
        let d = dataset();
        let other = Arc::new(InstanceHeader::new("x".into(), vec![], None));
        let i: Box<dyn Instance> = Box::new(DenseInstance::new(other, vec![], 1.0));
        assert!(matches!(
            Dataset::new(d.header_arc(), vec![i]),
            Err(DistanceError::HeaderMismatch(_))
        ));
    }
}
