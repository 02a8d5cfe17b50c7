//! Output of a stability-selection run.

use serde::{Deserialize, Serialize};

use crate::domain::Node;
use crate::error::AppError;
use crate::graph::{Edge, EdgeListGraph, EdgeType, EdgeTypeProbability};

/// How often one candidate was adjacent to the target across subsamples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InclusionFrequency {
    pub node: Node,
    pub count: usize,
    /// `count / completed_subsamples`.
    pub frequency: f64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityResult {
    pub target: Node,
    /// Star graph: one `v --> target` edge per selected `v`.
    pub graph: EdgeListGraph,
    /// Every candidate, by descending count (ties in dataset column order).
    pub frequencies: Vec<InclusionFrequency>,
    pub pi_threshold: f64,
    pub subsample_size: usize,
    pub requested_subsamples: usize,
    pub completed_subsamples: usize,
    pub failed_subsamples: usize,
}

impl StabilityResult {
    pub fn selected(&self) -> Vec<&Node> {
        self.frequencies
            .iter()
            .filter(|f| f.selected)
            .map(|f| &f.node)
            .collect()
    }

    pub fn frequency_of(&self, name: &str) -> Option<&InclusionFrequency> {
        self.frequencies.iter().find(|f| f.node.name() == name)
    }

    /// Re-threshold the frequency table without rerunning any subsample.
    pub fn select_at(&self, pi_threshold: f64) -> Result<StabilityResult, AppError> {
        let frequencies = apply_threshold(self.frequencies.clone(), pi_threshold)?;
        let graph = build_star_graph(&self.target, &frequencies)?;
        Ok(StabilityResult {
            graph,
            frequencies,
            pi_threshold,
            ..self.clone()
        })
    }
}

/// Mark each entry selected iff `frequency >= pi_threshold`.
pub(crate) fn apply_threshold(
    mut frequencies: Vec<InclusionFrequency>,
    pi_threshold: f64,
) -> Result<Vec<InclusionFrequency>, AppError> {
    if !(pi_threshold.is_finite() && (0.0..=1.0).contains(&pi_threshold)) {
        return Err(AppError::config(format!(
            "piThreshold must be in [0, 1], got {pi_threshold}."
        )));
    }
    for f in &mut frequencies {
        f.selected = f.frequency >= pi_threshold;
    }
    Ok(frequencies)
}

/// Nodes = selected candidates (in ranking order) then the target; one
/// directed edge from each selected node into the target, annotated with the
/// probability that the edge is present.
pub(crate) fn build_star_graph(
    target: &Node,
    frequencies: &[InclusionFrequency],
) -> Result<EdgeListGraph, AppError> {
    let selected: Vec<&InclusionFrequency> = frequencies
        .iter()
        .filter(|f| f.selected && &f.node != target)
        .collect();

    let mut graph = EdgeListGraph::new(selected.iter().map(|f| f.node.clone()));
    graph.add_node(target.clone());

    for f in selected {
        let edge = Edge::directed(f.node.clone(), target.clone()).with_properties(vec![
            EdgeTypeProbability {
                edge_type: EdgeType::DirectedForward,
                probability: f.frequency,
            },
            EdgeTypeProbability {
                edge_type: EdgeType::Nil,
                probability: 1.0 - f.frequency,
            },
        ]);
        graph.add_edge(edge)?;
    }

    Ok(graph)
}
