/// Column-wise standardization to zero mean and unit variance
///
/// Statistics are computed over the whole table at fit time and reapplied
/// identically to every later vector; there is no separate train/query
/// distribution. Zero-variance columns are centered but not rescaled.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Fits column statistics over the given rows
    ///
    /// All rows must share the same width. Uses the population standard
    /// deviation, matching the dataset-wide semantics of the transform.
    pub fn fit(rows: &[Vec<f64>]) -> Self {
        let width = rows.first().map_or(0, Vec::len);
        let count = rows.len() as f64;

        let mut means = vec![0.0; width];
        for row in rows {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += value;
            }
        }
        for mean in &mut means {
            *mean /= count;
        }

        let mut scales = vec![0.0; width];
        for row in rows {
            for ((scale, mean), value) in scales.iter_mut().zip(&means).zip(row) {
                let centered = value - mean;
                *scale += centered * centered;
            }
        }
        for scale in &mut scales {
            *scale = (*scale / count).sqrt();
            if *scale == 0.0 {
                *scale = 1.0;
            }
        }

        Self { means, scales }
    }

    /// Applies the fitted transform to a single row
    pub fn transform(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(&self.means)
            .zip(&self.scales)
            .map(|((value, mean), scale)| (value - mean) / scale)
            .collect()
    }

    /// Fits on the rows and returns the standardized matrix
    pub fn fit_transform(rows: &[Vec<f64>]) -> (Self, Vec<Vec<f64>>) {
        let scaler = Self::fit(rows);
        let matrix = rows.iter().map(|row| scaler.transform(row)).collect();
        (scaler, matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardizes_to_zero_mean_unit_variance() {
        let rows = vec![vec![8.0], vec![7.0], vec![6.0]];
        let (_, matrix) = StandardScaler::fit_transform(&rows);

        let mean: f64 = matrix.iter().map(|r| r[0]).sum::<f64>() / 3.0;
        let var: f64 = matrix.iter().map(|r| r[0] * r[0]).sum::<f64>() / 3.0;
        assert!(mean.abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);
        assert!(matrix[0][0] > 0.0 && matrix[2][0] < 0.0);
    }

    #[test]
    fn test_constant_column_centers_without_rescaling() {
        let rows = vec![vec![4.0, 1.0], vec![4.0, 2.0]];
        let (_, matrix) = StandardScaler::fit_transform(&rows);

        assert_eq!(matrix[0][0], 0.0);
        assert_eq!(matrix[1][0], 0.0);
        assert!((matrix[0][1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_matches_fit_statistics() {
        let rows = vec![vec![1.0], vec![3.0]];
        let scaler = StandardScaler::fit(&rows);

        // A later query vector gets the identical transform
        assert!((scaler.transform(&[2.0])[0]).abs() < 1e-12);
        assert!((scaler.transform(&[3.0])[0] - 1.0).abs() < 1e-12);
    }
}
