use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::io::Error;
use std::sync::Arc;

#[derive(Clone)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
    pub weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> DenseInstance {
        DenseInstance {
            header,
            values,
            weight,
        }
    }

    /// Builds an instance from labels; `"?"` and unknown labels become missing.
    /// Numeric attributes parse the text, falling back to missing.
    pub fn from_labels<S: AsRef<str>>(header: Arc<InstanceHeader>, labels: &[S]) -> DenseInstance {
        let values = labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let label = label.as_ref();
                match header.attribute_at_index(i).and_then(|a| a.as_nominal()) {
                    Some(nominal) => nominal
                        .index_of_value(label)
                        .map(|v| v as f64)
                        .unwrap_or(f64::NAN),
                    None => label.parse::<f64>().unwrap_or(f64::NAN),
                }
            })
            .collect();
        DenseInstance::new(header, values, 1.0)
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, new_value: f64) -> Result<(), Error> {
        if new_value < 0.0 {
            Err(Error::new(
                std::io::ErrorKind::InvalidInput,
                "Weight cannot be negative",
            ))
        } else {
            self.weight = new_value;
            Ok(())
        }
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), Error> {
        if index < self.values.len() {
            self.values[index] = new_value;
            Ok(())
        } else {
            Err(Error::new(
                std::io::ErrorKind::InvalidInput,
                "Index out of bounds",
            ))
        }
    }

    fn is_missing_at_index(&self, index: usize) -> Result<bool, Error> {
        if index < self.values.len() {
            Ok(self.values[index].is_nan())
        } else {
            Err(Error::new(
                std::io::ErrorKind::InvalidInput,
                "Index out of bounds",
            ))
        }
    }

    fn num_values(&self) -> usize {
        self.values.len()
    }

    fn index(&self, position: usize) -> usize {
        position
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn with_header(&self, header: Arc<InstanceHeader>) -> Box<dyn Instance> {
        Box::new(DenseInstance::new(header, self.values.clone(), self.weight))
    }
}
