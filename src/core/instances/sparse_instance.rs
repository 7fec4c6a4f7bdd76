use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::io::{Error, ErrorKind};
use std::sync::Arc;

/// Instance storing only some attributes; absent attributes are missing.
///
/// `indices` is kept sorted so distance functions can merge two records.
#[derive(Clone)]
pub struct SparseInstance {
    pub header: Arc<InstanceHeader>,
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
    pub weight: f64,
}

impl SparseInstance {
    pub fn new(
        header: Arc<InstanceHeader>,
        mut pairs: Vec<(usize, f64)>,
        weight: f64,
    ) -> Result<SparseInstance, Error> {
        let n = header.number_of_attributes();
        if let Some((index, _)) = pairs.iter().find(|(i, _)| *i >= n) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("attribute index {index} out of bounds ({n} attributes)"),
            ));
        }
        pairs.sort_by_key(|(i, _)| *i);
        pairs.dedup_by_key(|(i, _)| *i);
        let (indices, values) = pairs.into_iter().unzip();
        Ok(SparseInstance {
            header,
            indices,
            values,
            weight,
        })
    }

    /// Builds an instance from `(attribute name, label)` pairs.
    pub fn from_labels(
        header: Arc<InstanceHeader>,
        labels: &[(&str, &str)],
    ) -> Result<SparseInstance, Error> {
        let mut pairs = Vec::with_capacity(labels.len());
        for (name, label) in labels {
            let index = header.index_of_attribute(name).ok_or_else(|| {
                Error::new(ErrorKind::InvalidInput, format!("unknown attribute {name}"))
            })?;
            let value = match header.nominal_at_index(index) {
                Some(nominal) => nominal
                    .index_of_value(label)
                    .map(|v| v as f64)
                    .unwrap_or(f64::NAN),
                None => label.parse::<f64>().unwrap_or(f64::NAN),
            };
            pairs.push((index, value));
        }
        SparseInstance::new(header, pairs, 1.0)
    }

    fn position_of(&self, index: usize) -> Option<usize> {
        self.indices.binary_search(&index).ok()
    }
}

impl Instance for SparseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, new_value: f64) -> Result<(), Error> {
        if new_value < 0.0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Weight cannot be negative",
            ));
        }
        self.weight = new_value;
        Ok(())
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        if index >= self.header.number_of_attributes() {
            return None;
        }
        Some(
            self.position_of(index)
                .map(|p| self.values[p])
                .unwrap_or(f64::NAN),
        )
    }

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), Error> {
        if index >= self.header.number_of_attributes() {
            return Err(Error::new(ErrorKind::InvalidInput, "Index out of bounds"));
        }
        match self.indices.binary_search(&index) {
            Ok(p) => self.values[p] = new_value,
            Err(p) => {
                self.indices.insert(p, index);
                self.values.insert(p, new_value);
            }
        }
        Ok(())
    }

    fn is_missing_at_index(&self, index: usize) -> Result<bool, Error> {
        self.value_at_index(index)
            .map(f64::is_nan)
            .ok_or_else(|| Error::new(ErrorKind::InvalidInput, "Index out of bounds"))
    }

    fn num_values(&self) -> usize {
        self.indices.len()
    }

    fn index(&self, position: usize) -> usize {
        self.indices[position]
    }

    fn to_vec(&self) -> Vec<f64> {
        let mut dense = vec![f64::NAN; self.header.number_of_attributes()];
        for (&i, &v) in self.indices.iter().zip(&self.values) {
            dense[i] = v;
        }
        dense
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn with_header(&self, header: Arc<InstanceHeader>) -> Box<dyn Instance> {
        Box::new(SparseInstance {
            header,
            indices: self.indices.clone(),
            values: self.values.clone(),
            weight: self.weight,
        })
    }
}
