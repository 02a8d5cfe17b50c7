//! Decomposable scores over a dataset.
//!
//! A `ScoreBuilder` turns a (sub)sample into a `Score`; searches only see the
//! `Score` trait, so the aggregator can pair any builder with any search.

use crate::data::DataSet;
use crate::domain::Node;
use crate::error::AppError;

pub mod sem_bic;

pub use sem_bic::{SemBicScore, SemBicScoreBuilder};

/// Local (per-node) score of a node given a conditioning set. Higher is better.
pub trait Score: Send + Sync {
    fn variables(&self) -> &[Node];

    fn sample_size(&self) -> usize;

    fn local_score(&self, node: usize, parents: &[usize]) -> Result<f64, AppError>;

    /// Score change for `y` when `x` is added to conditioning set `z`.
    fn local_score_diff(&self, x: usize, y: usize, z: &[usize]) -> Result<f64, AppError> {
        let mut with_x = Vec::with_capacity(z.len() + 1);
        with_x.extend_from_slice(z);
        with_x.push(x);
        Ok(self.local_score(y, &with_x)? - self.local_score(y, z)?)
    }

    fn index_of(&self, node: &Node) -> Option<usize> {
        self.variables().iter().position(|v| v == node)
    }
}

/// Prepares a score on each (sub)sample; `penalty_discount` is forwarded from
/// the run configuration.
pub trait ScoreBuilder: Send + Sync {
    type Output: Score;

    fn build(&self, data: &DataSet, penalty_discount: f64) -> Result<Self::Output, AppError>;
}
