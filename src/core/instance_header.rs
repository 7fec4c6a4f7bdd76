use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};

/// Schema shared by every instance of a dataset.
///
/// `class_index` is optional: distance functions work on unlabeled data, while
/// the dissimilarity trainer designates each attribute as the class in turn.
#[derive(Clone)]
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: Option<usize>,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: Option<usize>,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    /// Same relation and attributes with a different class attribute.
    pub fn with_class_index(&self, class_index: Option<usize>) -> InstanceHeader {
        InstanceHeader {
            relation_name: self.relation_name.clone(),
            attributes: self.attributes.clone(),
            class_index,
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes.get(index).map(|a| a.as_ref())
    }

    pub fn nominal_at_index(&self, index: usize) -> Option<&NominalAttribute> {
        self.attribute_at_index(index).and_then(|a| a.as_nominal())
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&dyn Attribute> {
        self.class_index.and_then(|i| self.attribute_at_index(i))
    }

    pub fn number_of_classes(&self) -> usize {
        self.class_attribute()
            .and_then(|a| a.as_nominal())
            .map(|n| n.values.len())
            .unwrap_or(0)
    }

    /// Sum of declared labels over all attributes.
    pub fn total_declared_values(&self) -> usize {
        self.attributes.iter().map(|a| a.num_values()).sum()
    }
}
