use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use crate::testing::dummies::weather_header;
use std::sync::Arc;

const WEATHER_ROWS: [[&str; 5]; 14] = [
    ["sunny", "hot", "high", "FALSE", "no"],
    ["sunny", "hot", "high", "TRUE", "no"],
    ["overcast", "hot", "high", "FALSE", "yes"],
    ["rainy", "mild", "high", "FALSE", "yes"],
    ["rainy", "cool", "normal", "FALSE", "yes"],
    ["rainy", "cool", "normal", "TRUE", "no"],
    ["overcast", "cool", "normal", "TRUE", "yes"],
    ["sunny", "mild", "high", "FALSE", "no"],
    ["sunny", "cool", "normal", "FALSE", "yes"],
    ["rainy", "mild", "normal", "FALSE", "yes"],
    ["sunny", "mild", "normal", "TRUE", "yes"],
    ["overcast", "mild", "high", "TRUE", "yes"],
    ["overcast", "hot", "normal", "FALSE", "yes"],
    ["rainy", "mild", "high", "TRUE", "no"],
];

/// Dense dataset built from label rows; `"?"` marks a missing value.
pub fn dataset_from_rows<S: AsRef<str>>(header: Arc<InstanceHeader>, rows: &[Vec<S>]) -> Dataset {
    let instances = rows
        .iter()
        .map(|r| Box::new(DenseInstance::from_labels(Arc::clone(&header), r)) as Box<dyn Instance>)
        .collect();
    Dataset::new(header, instances).expect("rows must match the header")
}

/// The classic 14-row nominal weather data, no class attribute.
pub fn weather_nominal() -> Dataset {
    let rows: Vec<Vec<&str>> = WEATHER_ROWS.iter().map(|r| r.to_vec()).collect();
    dataset_from_rows(weather_header(), &rows)
}
