use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;
use std::io::Error;
use std::sync::Arc;

/// Label reported for an explicit missing value.
pub const MISSING_VALUE: &str = "?";

/// A record. Values are encoded as `f64`: the label position for nominal
/// attributes, the number itself for numeric ones and `NaN` when missing.
///
/// Sparse implementations only store some attributes; `num_values` and
/// `index` enumerate the stored attribute indices in ascending order.
pub trait Instance: Send + Sync {
    fn weight(&self) -> f64;

    fn set_weight(&mut self, new_value: f64) -> Result<(), Error>;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), Error>;

    fn is_missing_at_index(&self, index: usize) -> Result<bool, Error>;

    /// Number of stored values.
    fn num_values(&self) -> usize;

    /// Attribute index of the value stored at `position`.
    fn index(&self, position: usize) -> usize;

    fn number_of_attributes(&self) -> usize {
        self.header().number_of_attributes()
    }

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header().attribute_at_index(index)
    }

    fn class_index(&self) -> Option<usize> {
        self.header().class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.class_index().and_then(|i| self.value_at_index(i))
    }

    fn is_class_missing(&self) -> bool {
        self.class_value().is_none_or(f64::is_nan)
    }

    fn number_of_classes(&self) -> usize {
        self.header().number_of_classes()
    }

    /// Label of a nominal value, the number of a numeric one, or
    /// [`MISSING_VALUE`]. `None` when `index` is out of bounds.
    fn string_value(&self, index: usize) -> Option<String> {
        let value = self.value_at_index(index)?;
        if value.is_nan() {
            return Some(MISSING_VALUE.to_string());
        }
        match self.attribute_at_index(index)?.as_nominal() {
            Some(nominal) => nominal.value(value as usize).map(str::to_string),
            None => Some(value.to_string()),
        }
    }

    fn to_vec(&self) -> Vec<f64>;

    fn header(&self) -> &InstanceHeader;

    /// Copy of this instance bound to another header with the same attributes.
    fn with_header(&self, header: Arc<InstanceHeader>) -> Box<dyn Instance>;
}
