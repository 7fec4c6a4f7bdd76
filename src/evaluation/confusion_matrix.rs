/// Square matrix of weights: `cells[actual][predicted]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfusionMatrix {
    cells: Vec<Vec<f64>>,
}

impl ConfusionMatrix {
    pub fn new(num_classes: usize) -> Self {
        Self {
            cells: vec![vec![0.0; num_classes]; num_classes],
        }
    }

    /// Builds a matrix from rows; short rows are padded with zeros.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let n = rows.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
        let mut cells = rows;
        cells.resize_with(n, Vec::new);
        for row in cells.iter_mut() {
            row.resize(n, 0.0);
        }
        Self { cells }
    }

    pub fn num_classes(&self) -> usize {
        self.cells.len()
    }

    pub fn add(&mut self, actual: usize, predicted: usize, weight: f64) {
        let needed = actual.max(predicted) + 1;
        if needed > self.cells.len() {
            self.grow(needed);
        }
        self.cells[actual][predicted] += weight;
    }

    fn grow(&mut self, n: usize) {
        for row in self.cells.iter_mut() {
            row.resize(n, 0.0);
        }
        self.cells.resize_with(n, || vec![0.0; n]);
    }

    /// Adds every cell of `other` into `self`.
    pub fn merge(&mut self, other: &ConfusionMatrix) {
        if other.num_classes() > self.num_classes() {
            self.grow(other.num_classes());
        }
        for (i, row) in other.cells.iter().enumerate() {
            for (j, w) in row.iter().enumerate() {
                self.cells[i][j] += w;
            }
        }
    }

    pub fn get(&self, actual: usize, predicted: usize) -> f64 {
        self.cells
            .get(actual)
            .and_then(|r| r.get(predicted))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.cells
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.cells
    }

    pub fn row_sum(&self, actual: usize) -> f64 {
        self.cells.get(actual).map(|r| r.iter().sum()).unwrap_or(0.0)
    }

    pub fn column_sum(&self, predicted: usize) -> f64 {
        self.cells.iter().filter_map(|r| r.get(predicted)).sum()
    }

    pub fn total(&self) -> f64 {
        self.cells.iter().flatten().sum()
    }

    pub fn correct(&self) -> f64 {
        (0..self.num_classes()).map(|i| self.cells[i][i]).sum()
    }

    /// `NaN` for an empty matrix.
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total > 0.0 {
            self.correct() / total
        } else {
            f64::NAN
        }
    }

    /// Cohen's kappa. An empty matrix scores 0; when chance agreement is
    /// already perfect the predictions cannot be worse than chance and the
    /// score is 1.
    pub fn kappa(&self) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        let p_o = self.correct() / total;
        let p_e: f64 = (0..self.num_classes())
            .map(|c| (self.row_sum(c) / total) * (self.column_sum(c) / total))
            .sum();
        let denom = 1.0 - p_e;
        if denom.abs() <= f64::EPSILON {
            1.0
        } else {
            (p_o - p_e) / denom
        }
    }
}
