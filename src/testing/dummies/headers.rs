use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::core::instance_header::InstanceHeader;
use std::collections::HashMap;
use std::sync::Arc;

/// One attribute `x ∈ {a, b}` and the class `class ∈ {A, B}`.
pub fn header_binary() -> Arc<InstanceHeader> {
    let vals = vec!["A".to_string(), "B".to_string()];
    let mut map = HashMap::new();
    map.insert("A".to_string(), 0);
    map.insert("B".to_string(), 1);
    let class_attribute =
        Arc::new(NominalAttribute::with_values("class".into(), vals, map)) as AttributeRef;
    let x = Arc::new(NominalAttribute::from_labels("x", &["a", "b"])) as AttributeRef;

    Arc::new(InstanceHeader::new("bin".into(), vec![x, class_attribute], Some(1)))
}

/// The nominal weather relation without a class attribute.
pub fn weather_header() -> Arc<InstanceHeader> {
    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NominalAttribute::from_labels(
            "outlook",
            &["sunny", "overcast", "rainy"],
        )),
        Arc::new(NominalAttribute::from_labels(
            "temperature",
            &["hot", "mild", "cool"],
        )),
        Arc::new(NominalAttribute::from_labels("humidity", &["high", "normal"])),
        Arc::new(NominalAttribute::from_labels("windy", &["TRUE", "FALSE"])),
        Arc::new(NominalAttribute::from_labels("play", &["yes", "no"])),
    ];
    Arc::new(InstanceHeader::new("weather.symbolic".into(), attributes, None))
}
