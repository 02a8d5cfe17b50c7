//! Sample covariance matrix and conditional (residual) variances.

use nalgebra::{DMatrix, DVector};

use crate::data::DataSet;
use crate::domain::Node;
use crate::error::AppError;
use crate::math::ols::solve_spd;

#[derive(Debug, Clone)]
pub struct CovarianceMatrix {
    variables: Vec<Node>,
    sample_size: usize,
    matrix: DMatrix<f64>,
}

impl CovarianceMatrix {
    /// Unbiased sample covariance (`n - 1` denominator) of every column pair.
    pub fn from_dataset(data: &DataSet) -> Result<Self, AppError> {
        let n = data.num_rows();
        if n < 2 {
            return Err(AppError::compute(format!(
                "Covariance needs at least 2 rows, got {n}."
            )));
        }

        let mut centered = data.matrix().clone();
        for mut column in centered.column_iter_mut() {
            let mean = column.mean();
            column.add_scalar_mut(-mean);
        }
        let matrix = centered.tr_mul(&centered) / (n as f64 - 1.0);

        Ok(Self {
            variables: data.variables().to_vec(),
            sample_size: n,
            matrix,
        })
    }

    pub fn variables(&self) -> &[Node] {
        &self.variables
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.matrix[(i, j)]
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// Variance of `y` left after linearly regressing it on `z`.
    ///
    /// `σ²_{y|z} = Σ_yy - Σ_yz Σ_zz⁻¹ Σ_zy`. Returns `None` if the system
    /// cannot be solved.
    pub fn residual_variance(&self, y: usize, z: &[usize]) -> Option<f64> {
        let syy = self.matrix[(y, y)];
        if z.is_empty() {
            return Some(syy);
        }

        let szz = DMatrix::from_fn(z.len(), z.len(), |a, b| self.matrix[(z[a], z[b])]);
        let szy = DVector::from_iterator(z.len(), z.iter().map(|&k| self.matrix[(k, y)]));
        let beta = solve_spd(&szz, &szy)?;
        Some(syy - szy.dot(&beta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(rows: &[Vec<f64>]) -> DataSet {
        let vars = (0..rows[0].len()).map(|i| Node::new(format!("V{i}"))).collect();
        DataSet::from_rows(vars, rows).unwrap()
    }

    #[test]
    fn covariance_of_small_sample() {
        // x = [1,2,3,4], y = 2x
        let rows: Vec<Vec<f64>> = (1..=4).map(|i| vec![i as f64, 2.0 * i as f64]).collect();
        let cov = CovarianceMatrix::from_dataset(&dataset(&rows)).unwrap();
        // var(x) = 5/3
        assert!((cov.value(0, 0) - 5.0 / 3.0).abs() < 1e-12);
        assert!((cov.value(0, 1) - 10.0 / 3.0).abs() < 1e-12);
        assert!((cov.value(1, 1) - 20.0 / 3.0).abs() < 1e-12);
        assert_eq!(cov.sample_size(), 4);
    }

    #[test]
    fn residual_variance_of_exact_linear_relation_is_zero() {
        let rows: Vec<Vec<f64>> = (1..=6).map(|i| vec![i as f64, 3.0 * i as f64 + 1.0]).collect();
        let cov = CovarianceMatrix::from_dataset(&dataset(&rows)).unwrap();
        let resid = cov.residual_variance(1, &[0]).unwrap();
        assert!(resid.abs() < 1e-9);
        assert!((cov.residual_variance(1, &[]).unwrap() - cov.value(1, 1)).abs() < 1e-12);
    }

    #[test]
    fn rejects_single_row() {
        let err = CovarianceMatrix::from_dataset(&dataset(&[vec![1.0, 2.0]])).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
