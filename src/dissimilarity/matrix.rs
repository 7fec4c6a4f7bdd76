//! Row-wise matrix steps turning a confusion matrix into a dissimilarity
//! matrix.

use crate::dissimilarity::options::DiagonalStrategy;

pub type Matrix = Vec<Vec<f64>>;

/// Divides every row by its sum. Rows summing to zero stay zero.
pub fn normalize_rows(matrix: &Matrix) -> Matrix {
    matrix
        .iter()
        .map(|row| {
            let sum: f64 = row.iter().sum();
            if sum == 0.0 {
                vec![0.0; row.len()]
            } else {
                row.iter().map(|v| v / sum).collect()
            }
        })
        .collect()
}

fn add_to_diagonal(matrix: &mut Matrix, amount: f64) {
    for (i, row) in matrix.iter_mut().enumerate() {
        if let Some(cell) = row.get_mut(i) {
            *cell += amount;
        }
    }
}

fn force_diagonal(matrix: &mut Matrix) {
    for (i, row) in matrix.iter_mut().enumerate() {
        if let Some(cell) = row.get_mut(i) {
            *cell = 1.0;
        }
    }
}

impl DiagonalStrategy {
    /// Applies the strategy to a row-normalized similarity matrix.
    pub fn apply(self, similarity: &Matrix) -> Matrix {
        let mut m = similarity.clone();
        match self {
            DiagonalStrategy::Untouched => m,
            DiagonalStrategy::ForceOne => {
                force_diagonal(&mut m);
                m
            }
            DiagonalStrategy::AddOne | DiagonalStrategy::AddTwo => {
                let amount = if self == DiagonalStrategy::AddOne { 1.0 } else { 2.0 };
                add_to_diagonal(&mut m, amount);
                normalize_rows(&m)
            }
            DiagonalStrategy::AddOneForceOne | DiagonalStrategy::AddTwoForceOne => {
                let amount = if self == DiagonalStrategy::AddOneForceOne { 1.0 } else { 2.0 };
                add_to_diagonal(&mut m, amount);
                let mut m = normalize_rows(&m);
                force_diagonal(&mut m);
                m
            }
        }
    }
}

/// `(m[i][j] + m[j][i]) / 2`.
pub fn symmetrize(matrix: &Matrix) -> Matrix {
    let n = matrix.len();
    let at = |i: usize, j: usize| matrix.get(i).and_then(|r| r.get(j)).copied().unwrap_or(0.0);
    (0..n)
        .map(|i| (0..n).map(|j| (at(i, j) + at(j, i)) / 2.0).collect())
        .collect()
}

/// `1 − s`, clamped to `[0, 1]`.
pub fn complement(similarity: &Matrix) -> Matrix {
    similarity
        .iter()
        .map(|row| row.iter().map(|s| (1.0 - s).clamp(0.0, 1.0)).collect())
        .collect()
}
