#![allow(dead_code)]

use cadis::core::attributes::{AttributeRef, NominalAttribute};
use cadis::core::dataset::Dataset;
use cadis::core::instance_header::InstanceHeader;
use cadis::core::instances::{DenseInstance, Instance};
use std::sync::Arc;

pub const WEATHER: [[&str; 5]; 14] = [
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

pub fn weather_header() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NominalAttribute::from_labels("outlook", &["sunny", "overcast", "rainy"])),
        Arc::new(NominalAttribute::from_labels("temperature", &["hot", "mild", "cool"])),
        Arc::new(NominalAttribute::from_labels("humidity", &["high", "normal"])),
        Arc::new(NominalAttribute::from_labels("windy", &["TRUE", "FALSE"])),
        Arc::new(NominalAttribute::from_labels("play", &["yes", "no"])),
    ];
    Arc::new(InstanceHeader::new("weather.symbolic".into(), attributes, None))
}

pub fn rows_to_dataset<S: AsRef<str>>(header: Arc<InstanceHeader>, rows: &[Vec<S>]) -> Dataset {
    let instances = rows
        .iter()
        .map(|r| Box::new(DenseInstance::from_labels(Arc::clone(&header), r)) as Box<dyn Instance>)
        .collect();
    Dataset::new(header, instances).unwrap()
}

pub fn weather() -> Dataset {
    let rows: Vec<Vec<&str>> = WEATHER.iter().map(|r| r.to_vec()).collect();
    rows_to_dataset(weather_header(), &rows)
}

/// Weather rows repeated `times` times, enough data for every default
/// classifier to score each attribute.
pub fn weather_repeated(times: usize) -> Dataset {
    let rows: Vec<Vec<&str>> = (0..times)
        .flat_map(|_| WEATHER.iter().map(|r| r.to_vec()))
        .collect();
    rows_to_dataset(weather_header(), &rows)
}
