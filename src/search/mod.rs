//! Markov-blanket searches.
//!
//! A search receives a prepared `Score` and a target node and returns a graph
//! whose nodes adjacent to the target are the estimated blanket.

use crate::domain::Node;
use crate::error::AppError;
use crate::graph::EdgeListGraph;
use crate::score::Score;

pub mod forward_backward;

pub use forward_backward::ForwardBackwardMb;

pub trait MarkovBlanketSearch: Send + Sync {
    fn search<S: Score>(&self, score: &S, target: &Node) -> Result<EdgeListGraph, AppError>;
}
