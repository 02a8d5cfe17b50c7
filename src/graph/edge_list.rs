//! Edge-list graph.
//!
//! Nodes keep insertion order so printed graphs and exports are stable.

use serde::{Deserialize, Serialize};

use crate::domain::Node;
use crate::error::AppError;
use crate::graph::edge::Edge;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeListGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl EdgeListGraph {
    /// Graph over `nodes` with no edges. Duplicate names are dropped.
    pub fn new(nodes: impl IntoIterator<Item = Node>) -> Self {
        let mut graph = Self::default();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Add a node; returns `false` if it was already present.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.contains_node(&node) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    pub fn contains_node(&self, node: &Node) -> bool {
        self.nodes.contains(node)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Add an edge. Both endpoints must already be nodes of the graph, and at
    /// most one edge may join a pair.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), AppError> {
        for node in [&edge.node1, &edge.node2] {
            if !self.contains_node(node) {
                return Err(AppError::compute(format!(
                    "Cannot add edge {edge}: node '{node}' is not in the graph."
                )));
            }
        }
        if edge.node1 == edge.node2 {
            return Err(AppError::compute(format!("Self-loop on '{}' is not allowed.", edge.node1)));
        }
        if self.is_adjacent_to(&edge.node1, &edge.node2) {
            return Err(AppError::compute(format!(
                "Nodes '{}' and '{}' are already adjacent.",
                edge.node1, edge.node2
            )));
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn add_directed_edge(&mut self, from: &Node, to: &Node) -> Result<(), AppError> {
        self.add_edge(Edge::directed(from.clone(), to.clone()))
    }

    pub fn add_undirected_edge(&mut self, a: &Node, b: &Node) -> Result<(), AppError> {
        self.add_edge(Edge::undirected(a.clone(), b.clone()))
    }

    pub fn edge(&self, a: &Node, b: &Node) -> Option<&Edge> {
        self.edges.iter().find(|e| e.connects(a, b))
    }

    pub fn edge_mut(&mut self, a: &Node, b: &Node) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|e| e.connects(a, b))
    }

    pub fn is_adjacent_to(&self, a: &Node, b: &Node) -> bool {
        self.edge(a, b).is_some()
    }

    /// Nodes sharing an edge with `node`, in node order.
    pub fn adjacent_nodes(&self, node: &Node) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|other| *other != node && self.is_adjacent_to(node, other))
            .cloned()
            .collect()
    }

    /// Tails of directed edges into `node`.
    pub fn parents(&self, node: &Node) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|other| {
                self.edge(node, other)
                    .is_some_and(|e| e.points_into(node) && *other != node)
            })
            .cloned()
            .collect()
    }

    /// Heads of directed edges out of `node`.
    pub fn children(&self, node: &Node) -> Vec<Node> {
        self.nodes
            .iter()
            .filter(|other| {
                self.edge(node, other)
                    .is_some_and(|e| e.points_into(other) && *other != node)
            })
            .cloned()
            .collect()
    }

    /// Parents, children and the children's other parents of `node`.
    pub fn markov_blanket(&self, node: &Node) -> Vec<Node> {
        let mut members = self.parents(node);
        for child in self.children(node) {
            for spouse in self.parents(&child) {
                if &spouse != node && !members.contains(&spouse) {
                    members.push(spouse);
                }
            }
            if !members.contains(&child) {
                members.push(child);
            }
        }
        // Report in node order rather than discovery order.
        self.nodes
            .iter()
            .filter(|n| members.contains(n))
            .cloned()
            .collect()
    }
}

impl std::fmt::Display for EdgeListGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Graph Nodes:")?;
        let names: Vec<&str> = self.nodes.iter().map(|n| n.name()).collect();
        writeln!(f, "{}", names.join(";"))?;
        writeln!(f)?;
        writeln!(f, "Graph Edges:")?;
        for (i, edge) in self.edges.iter().enumerate() {
            writeln!(f, "{}. {edge}", i + 1)?;
        }
        Ok(())
    }
}
