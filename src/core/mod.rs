pub mod attributes;
pub mod dataset;
pub mod estimators;
pub mod frequency_table;
pub mod instance_header;
pub mod instances;
pub mod probability_model;
