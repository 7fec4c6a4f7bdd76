/// `p·log2(p)` with the convention `0·log2(0) = 0`.
pub fn x_log2_x(p: f64) -> f64 {
    if p <= 0.0 { 0.0 } else { p * p.log2() }
}

/// Binary entropy in bits of a Bernoulli variable with success probability `p`.
pub fn binary_entropy(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    -(x_log2_x(p) + x_log2_x(1.0 - p))
}
