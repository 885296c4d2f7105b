/// Brute-force nearest-neighbor index under cosine distance
///
/// Fitted once over the full standardized matrix and treated as read-only
/// afterwards. The table sizes this system works with (a few thousand rows)
/// make an exact linear scan both simpler and fast enough; the index is
/// rebuilt wholesale whenever the dataset changes.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    matrix: Vec<Vec<f64>>,
    norms: Vec<f64>,
}

/// Cosine distance `1 - cos(a, b)`, with zero-norm vectors treated as
/// maximally dissimilar (distance 1).
fn cosine_distance(a: &[f64], b: &[f64], norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let similarity = (dot / (norm_a * norm_b)).clamp(-1.0, 1.0);
    1.0 - similarity
}

fn norm(row: &[f64]) -> f64 {
    row.iter().map(|v| v * v).sum::<f64>().sqrt()
}

impl NearestNeighbors {
    /// Fits the index over the given row-major matrix
    pub fn fit(matrix: Vec<Vec<f64>>) -> Self {
        let norms = matrix.iter().map(|row| norm(row)).collect();
        Self { matrix, norms }
    }

    /// The k nearest rows to an arbitrary query vector
    ///
    /// Returns `(row_index, distance)` pairs ordered by ascending distance,
    /// ties broken by ascending row index. Returns fewer than k pairs when
    /// the matrix is smaller than k.
    pub fn kneighbors(&self, query: &[f64], k: usize) -> Vec<(usize, f64)> {
        let query_norm = norm(query);
        let distances = self
            .matrix
            .iter()
            .zip(&self.norms)
            .enumerate()
            .map(|(idx, (row, &row_norm))| {
                (idx, cosine_distance(query, row, query_norm, row_norm))
            })
            .collect();
        Self::top_k(distances, k)
    }

    /// The k nearest rows to a row already in the index
    ///
    /// Identical to `kneighbors` on the member's own vector, except that the
    /// self match carries an exact zero distance rather than one subject to
    /// floating-point rounding, so it always occupies the first position.
    pub fn kneighbors_of(&self, member: usize, k: usize) -> Vec<(usize, f64)> {
        let query = &self.matrix[member];
        let query_norm = self.norms[member];
        let distances = self
            .matrix
            .iter()
            .zip(&self.norms)
            .enumerate()
            .map(|(idx, (row, &row_norm))| {
                if idx == member {
                    (idx, 0.0)
                } else {
                    (idx, cosine_distance(query, row, query_norm, row_norm))
                }
            })
            .collect();
        Self::top_k(distances, k)
    }

    fn top_k(mut distances: Vec<(usize, f64)>, k: usize) -> Vec<(usize, f64)> {
        distances.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        distances.truncate(k);
        distances
    }
}
