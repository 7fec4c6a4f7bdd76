mod datasets;
mod headers;

pub use datasets::{dataset_from_rows, weather_nominal};
pub use headers::{header_binary, weather_header};
