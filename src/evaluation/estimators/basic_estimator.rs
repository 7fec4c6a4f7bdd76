use crate::evaluation::estimators::Estimator;

/// Running mean of the non-`NaN` values added so far. Used to average
/// per-fold metrics.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicEstimator {
    len: usize,
    sum: f64,
}

impl BasicEstimator {
    pub fn count(&self) -> usize {
        self.len
    }
}

impl Estimator for BasicEstimator {
    #[inline]
    fn add(&mut self, v: f64) {
        if v.is_nan() {
            return;
        }
        self.len += 1;
        self.sum += v;
    }

    #[inline]
    fn estimation(&self) -> f64 {
        if self.len > 0 {
            self.sum / self.len as f64
        } else {
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_ignores_nan() {
        let mut est = BasicEstimator::default();
        assert!(est.estimation().is_nan());
        for v in [0.5, f64::NAN, 1.0] {
            est.add(v);
        }
        assert_eq!(est.count(), 2);
        assert!((est.estimation() - 0.75).abs() < 1e-12);
    }
}
