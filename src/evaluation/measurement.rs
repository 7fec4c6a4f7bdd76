/// Named scalar reported by an evaluator, e.g. `"kappa"` or `"auc_pairwise"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: String,
    pub value: f64,
}

impl Measurement {
    #[inline]
    pub fn new<N: Into<String>>(name: N, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Looks a measurement up by name.
pub fn find_measurement(measurements: &[Measurement], name: &str) -> Option<f64> {
    measurements.iter().find(|m| m.name == name).map(|m| m.value)
}
