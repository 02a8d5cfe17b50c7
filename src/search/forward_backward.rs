//! Greedy forward-backward Markov-blanket search on a decomposable score.
//!
//! The target's conditioning set is grown by the single variable with the
//! largest positive score gain, then pruned of any member whose removal raises
//! the score, until neither phase changes the set. Every accepted move strictly
//! increases the target's local score, so the loop terminates.
//!
//! Under a linear-Gaussian model the variables with non-zero coefficients when
//! regressing the target on all others are exactly its parents, children and
//! spouses, so the selected set estimates the Markov blanket.

use tracing::debug;

use crate::domain::Node;
use crate::error::AppError;
use crate::graph::EdgeListGraph;
use crate::score::Score;
use crate::search::MarkovBlanketSearch;

#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardBackwardMb {
    /// Stop growing the blanket at this many members.
    pub max_blanket_size: Option<usize>,
}

impl ForwardBackwardMb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_blanket_size(max: usize) -> Self {
        Self {
            max_blanket_size: Some(max),
        }
    }

    /// Indices of the selected blanket for `target`, in ascending order.
    pub fn blanket_indices<S: Score>(&self, score: &S, target: usize) -> Result<Vec<usize>, AppError> {
        let p = score.variables().len();
        let mut blanket: Vec<usize> = Vec::new();

        loop {
            let mut changed = false;

            while self.max_blanket_size.is_none_or(|max| blanket.len() < max) {
                let mut best: Option<(usize, f64)> = None;
                for candidate in (0..p).filter(|&c| c != target && !blanket.contains(&c)) {
                    let gain = score.local_score_diff(candidate, target, &blanket)?;
                    if gain > 0.0 && best.is_none_or(|(_, g)| gain > g) {
                        best = Some((candidate, gain));
                    }
                }
                let Some((candidate, gain)) = best else { break };
                debug!(
                    target_node = %score.variables()[target],
                    added = %score.variables()[candidate],
                    gain,
                    "forward step"
                );
                blanket.push(candidate);
                changed = true;
            }

            loop {
                let mut best: Option<(usize, f64)> = None;
                for (pos, &member) in blanket.iter().enumerate() {
                    let rest: Vec<usize> = blanket.iter().copied().filter(|&m| m != member).collect();
                    let gain = -score.local_score_diff(member, target, &rest)?;
                    if gain > 0.0 && best.is_none_or(|(_, g)| gain > g) {
                        best = Some((pos, gain));
                    }
                }
                let Some((pos, gain)) = best else { break };
                let removed = blanket.remove(pos);
                debug!(
                    target_node = %score.variables()[target],
                    removed = %score.variables()[removed],
                    gain,
                    "backward step"
                );
                changed = true;
            }

            if !changed {
                break;
            }
        }

        blanket.sort_unstable();
        Ok(blanket)
    }
}

impl MarkovBlanketSearch for ForwardBackwardMb {
    fn search<S: Score>(&self, score: &S, target: &Node) -> Result<EdgeListGraph, AppError> {
        let t = score.index_of(target).ok_or_else(|| {
            AppError::config(format!("Target '{target}' is not a variable of the score."))
        })?;

        let blanket = self.blanket_indices(score, t)?;
        let variables = score.variables();

        let mut graph = EdgeListGraph::new(std::iter::once(target.clone()));
        for &m in &blanket {
            graph.add_node(variables[m].clone());
            graph.add_undirected_edge(target, &variables[m])?;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataSet;
    use crate::score::{ScoreBuilder, SemBicScoreBuilder};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand_distr::{Distribution, Normal};

    /// X -> T -> C <- S, with D independent of everything.
    fn collider_data(n: usize, seed: u64) -> DataSet {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let rows: Vec<Vec<f64>> = (0..n)
            .map(|_| {
                let x = normal.sample(&mut rng);
                let s = normal.sample(&mut rng);
                let d = normal.sample(&mut rng);
                let t = x + normal.sample(&mut rng);
                let c = t + s + normal.sample(&mut rng);
                vec![x, t, c, s, d]
            })
            .collect();
        let names = ["X", "T", "C", "S", "D"].iter().map(|n| Node::new(*n)).collect();
        DataSet::from_rows(names, &rows).unwrap()
    }

    #[test]
    fn finds_parents_children_and_spouses() {
        let data = collider_data(2000, 17);
        let score = SemBicScoreBuilder.build(&data, 2.0).unwrap();
        let target = Node::new("T");
        let graph = ForwardBackwardMb::new().search(&score, &target).unwrap();

        let adjacent: Vec<String> = graph
            .adjacent_nodes(&target)
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(adjacent, ["X", "C", "S"]);
        assert!(!graph.contains_node(&Node::new("D")));
    }

    #[test]
    fn blanket_size_cap_is_respected() {
        let data = collider_data(500, 5);
        let score = SemBicScoreBuilder.build(&data, 1.0).unwrap();
        let blanket = ForwardBackwardMb::with_max_blanket_size(1)
            .blanket_indices(&score, 1)
            .unwrap();
        assert!(blanket.len() <= 1);
    }

    #[test]
    fn unknown_target_is_a_config_error() {
        let data = collider_data(50, 1);
        let score = SemBicScoreBuilder.build(&data, 1.0).unwrap();
        let err = ForwardBackwardMb::new()
            .search(&score, &Node::new("nope"))
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
