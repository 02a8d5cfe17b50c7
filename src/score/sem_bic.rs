//! Linear-Gaussian BIC score computed from a covariance matrix.
//!
//! For node `y` with conditioning set `Z` (|Z| = k) on `n` rows:
//!
//! ```text
//! score(y | Z) = -n · ln σ²_{y|Z} - c · (k + 1) · ln n
//! ```
//!
//! where `c` is the penalty discount. `c = 1` is the usual BIC; larger values
//! prefer sparser conditioning sets.

use crate::data::DataSet;
use crate::domain::Node;
use crate::error::AppError;
use crate::math::CovarianceMatrix;
use crate::score::{Score, ScoreBuilder};

const RELATIVE_VARIANCE_FLOOR: f64 = 1e-10;

#[derive(Debug, Clone)]
pub struct SemBicScore {
    covariances: CovarianceMatrix,
    penalty_discount: f64,
}

impl SemBicScore {
    pub fn new(covariances: CovarianceMatrix, penalty_discount: f64) -> Result<Self, AppError> {
        if !(penalty_discount.is_finite() && penalty_discount > 0.0) {
            return Err(AppError::config(format!(
                "penaltyDiscount must be finite and > 0, got {penalty_discount}."
            )));
        }
        Ok(Self {
            covariances,
            penalty_discount,
        })
    }
}

impl Score for SemBicScore {
    fn variables(&self) -> &[Node] {
        self.covariances.variables()
    }

    fn sample_size(&self) -> usize {
        self.covariances.sample_size()
    }

    fn local_score(&self, node: usize, parents: &[usize]) -> Result<f64, AppError> {
        let variables = self.variables();
        if node >= variables.len() || parents.iter().any(|&p| p >= variables.len()) {
            return Err(AppError::compute("Score index out of range."));
        }
        if parents.contains(&node) {
            return Err(AppError::compute(format!(
                "'{}' cannot condition on itself.",
                variables[node]
            )));
        }

        let s2 = self
            .covariances
            .residual_variance(node, parents)
            .ok_or_else(|| {
                AppError::compute(format!(
                    "Could not regress '{}' on {} variables (singular covariance).",
                    variables[node],
                    parents.len()
                ))
            })?;
        let variance = self.covariances.value(node, node);
        if !(variance.is_finite() && variance > 0.0) {
            return Err(AppError::compute(format!(
                "'{}' is constant in this subsample (variance {variance:e}).",
                variables[node]
            )));
        }
        if !s2.is_finite() {
            return Err(AppError::compute(format!(
                "Non-finite residual variance for '{}'.",
                variables[node]
            )));
        }
        // A node determined exactly by its conditioning set leaves only
        // rounding noise; clamp so the score stays finite and comparable.
        let s2 = s2.max(variance * RELATIVE_VARIANCE_FLOOR);

        let n = self.sample_size() as f64;
        let k = parents.len() as f64;
        Ok(-n * s2.ln() - self.penalty_discount * (k + 1.0) * n.ln())
    }
}

/// Builds a `SemBicScore` from the sample covariance of each (sub)sample.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemBicScoreBuilder;

impl ScoreBuilder for SemBicScoreBuilder {
    type Output = SemBicScore;

    fn build(&self, data: &DataSet, penalty_discount: f64) -> Result<SemBicScore, AppError> {
        let covariances = CovarianceMatrix::from_dataset(data)?;
        SemBicScore::new(covariances, penalty_discount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SimulationConfig, simulate_linear_sem};

    fn chain_data() -> DataSet {
        // X1 -> X2 -> ... with every forward edge present.
        let config = SimulationConfig {
            num_variables: 3,
            num_rows: 400,
            edge_probability: 1.0,
            seed: 3,
            ..SimulationConfig::default()
        };
        simulate_linear_sem(&config).unwrap().dataset
    }

    #[test]
    fn adding_a_true_parent_improves_score() {
        let score = SemBicScoreBuilder.build(&chain_data(), 1.0).unwrap();
        let diff = score.local_score_diff(0, 1, &[]).unwrap();
        assert!(diff > 0.0, "X1 should explain X2, diff={diff}");
    }

    #[test]
    fn larger_penalty_lowers_score() {
        let data = chain_data();
        let a = SemBicScoreBuilder.build(&data, 1.0).unwrap();
        let b = SemBicScoreBuilder.build(&data, 4.0).unwrap();
        assert!(b.local_score(2, &[0, 1]).unwrap() < a.local_score(2, &[0, 1]).unwrap());
    }

    #[test]
    fn self_conditioning_and_bad_penalty_are_errors() {
        let data = chain_data();
        let score = SemBicScoreBuilder.build(&data, 1.0).unwrap();
        assert!(score.local_score(1, &[1]).is_err());
        assert!(SemBicScoreBuilder.build(&data, 0.0).is_err());
    }

    #[test]
    fn deterministic_node_gets_a_finite_clamped_score() {
        // t = a + b exactly; c is unrelated.
        let rows: Vec<Vec<f64>> = (0..30)
            .map(|i| {
                let a = (i as f64 * 0.7).sin();
                let b = (i as f64 * 1.3).cos();
                let c = ((i * 17) % 11) as f64;
                vec![a, b, c, a + b]
            })
            .collect();
        let names = ["a", "b", "c", "t"].iter().map(|n| Node::new(*n)).collect();
        let data = DataSet::from_rows(names, &rows).unwrap();
        let score = SemBicScoreBuilder.build(&data, 1.0).unwrap();

        let full = score.local_score(3, &[0, 1]).unwrap();
        assert!(full.is_finite());
        assert!(full > score.local_score(3, &[0]).unwrap());
        // Once clamped, an extra regressor only costs its penalty.
        let extra = score.local_score_diff(2, 3, &[0, 1]).unwrap();
        assert!(extra < 0.0, "extra={extra}");
    }

    #[test]
    fn constant_column_fails_with_compute_error() {
        let rows: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64, 5.0]).collect();
        let data = DataSet::from_rows(vec![Node::new("a"), Node::new("b")], &rows).unwrap();
        let score = SemBicScoreBuilder.build(&data, 1.0).unwrap();
        let err = score.local_score(1, &[0]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
        assert!(err.message().contains("constant"));
    }
}
