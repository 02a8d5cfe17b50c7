//! Least-squares solver.
//!
//! Regressions here are posed on covariance submatrices:
//!
//! ```text
//! Σ_zz β = Σ_zy
//! ```
//!
//! Implementation choices:
//! - Cholesky first; covariance submatrices are symmetric positive definite
//!   unless columns are collinear within a subsample.
//! - SVD fallback with progressively looser tolerances for the near-singular
//!   case so a single collinear pair does not abort a whole search.

use nalgebra::{DMatrix, DVector};

/// Solve `x β = y` in the least-squares sense using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve a symmetric positive (semi-)definite system `a β = b`.
pub fn solve_spd(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if let Some(chol) = a.clone().cholesky() {
        let beta = chol.solve(b);
        if beta.iter().all(|v| v.is_finite()) {
            return Some(beta);
        }
    }
    solve_least_squares(a, b)
}
