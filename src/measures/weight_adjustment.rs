use crate::dissimilarity::options::{LowWeightPolicy, MultiplyStyle};

/// Combines a trained attribute weight with a base difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WeightAdjustment {
    pub low_weight_policy: LowWeightPolicy,
    pub multiply_style: MultiplyStyle,
}

impl WeightAdjustment {
    pub fn new(low_weight_policy: LowWeightPolicy, multiply_style: MultiplyStyle) -> Self {
        Self {
            low_weight_policy,
            multiply_style,
        }
    }

    /// A weight below 0.5 first goes through the low-weight policy; otherwise
    /// (or under [`LowWeightPolicy::Base`]) the weight scales `base`.
    pub fn apply(&self, weight: f64, base: f64, equal: bool) -> f64 {
        if weight < 0.5 {
            match self.low_weight_policy {
                LowWeightPolicy::Base => {}
                LowWeightPolicy::DiscardLow => return 0.0,
                LowWeightPolicy::MaxLow => return 1.0,
                LowWeightPolicy::BaseLow => return if equal { 0.0 } else { 1.0 },
            }
        }
        match self.multiply_style {
            MultiplyStyle::Normal => weight * base,
            MultiplyStyle::OneMinus => (1.0 - weight) * base,
            MultiplyStyle::None => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adj(policy: LowWeightPolicy, style: MultiplyStyle) -> WeightAdjustment {
        WeightAdjustment::new(policy, style)
    }

    #[test]
    fn low_weight_policies() {
        use LowWeightPolicy::*;
        let n = MultiplyStyle::Normal;
        assert_eq!(adj(Base, n).apply(0.4, 0.5, false), 0.2);
        assert_eq!(adj(DiscardLow, n).apply(0.4, 0.5, false), 0.0);
        assert_eq!(adj(MaxLow, n).apply(0.4, 0.5, false), 1.0);
        assert_eq!(adj(BaseLow, n).apply(0.4, 0.5, false), 1.0);
        assert_eq!(adj(BaseLow, n).apply(0.4, 0.5, true), 0.0);
    }

    #[test]
    fn policies_do_not_apply_from_half_up() {
        let a = adj(LowWeightPolicy::MaxLow, MultiplyStyle::Normal);
        assert_eq!(a.apply(0.5, 0.5, false), 0.25);
    }

    #[test]
    fn multiply_styles() {
        let p = LowWeightPolicy::Base;
        assert_eq!(adj(p, MultiplyStyle::Normal).apply(0.75, 0.5, false), 0.375);
        assert_eq!(adj(p, MultiplyStyle::OneMinus).apply(0.75, 0.5, false), 0.125);
        assert_eq!(adj(p, MultiplyStyle::None).apply(0.75, 0.5, false), 0.5);
    }
}
