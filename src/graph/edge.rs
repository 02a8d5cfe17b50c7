//! Edges with endpoint marks and optional edge-type probabilities.

use serde::{Deserialize, Serialize};

use crate::domain::{Endpoint, Node};

/// Edge type between an ordered pair `(node1, node2)`, used when annotating an
/// edge with how often each type was observed across an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// No edge between the pair.
    Nil,
    /// `node1 --- node2`
    Undirected,
    /// `node1 --> node2`
    DirectedForward,
    /// `node1 <-- node2`
    DirectedBackward,
    /// `node1 <-> node2`
    Bidirected,
    /// `node1 o-> node2`
    PartiallyDirected,
    /// `node1 o-o node2`
    Nondirected,
}

impl EdgeType {
    pub fn endpoints(self) -> Option<(Endpoint, Endpoint)> {
        match self {
            EdgeType::Nil => None,
            EdgeType::Undirected => Some((Endpoint::Tail, Endpoint::Tail)),
            EdgeType::DirectedForward => Some((Endpoint::Tail, Endpoint::Arrow)),
            EdgeType::DirectedBackward => Some((Endpoint::Arrow, Endpoint::Tail)),
            EdgeType::Bidirected => Some((Endpoint::Arrow, Endpoint::Arrow)),
            EdgeType::PartiallyDirected => Some((Endpoint::Circle, Endpoint::Arrow)),
            EdgeType::Nondirected => Some((Endpoint::Circle, Endpoint::Circle)),
        }
    }
}

/// Probability that an edge has a given type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypeProbability {
    pub edge_type: EdgeType,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub node1: Node,
    pub node2: Node,
    pub endpoint1: Endpoint,
    pub endpoint2: Endpoint,
    /// Per-edge-type probabilities; empty when the edge is not from an ensemble.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<EdgeTypeProbability>,
}

impl Edge {
    pub fn new(node1: Node, node2: Node, endpoint1: Endpoint, endpoint2: Endpoint) -> Self {
        Self {
            node1,
            node2,
            endpoint1,
            endpoint2,
            properties: Vec::new(),
        }
    }

    /// `from --> to`
    pub fn directed(from: Node, to: Node) -> Self {
        Self::new(from, to, Endpoint::Tail, Endpoint::Arrow)
    }

    /// `a --- b`
    pub fn undirected(a: Node, b: Node) -> Self {
        Self::new(a, b, Endpoint::Tail, Endpoint::Tail)
    }

    pub fn with_properties(mut self, properties: Vec<EdgeTypeProbability>) -> Self {
        self.properties = properties;
        self
    }

    pub fn is_directed(&self) -> bool {
        matches!(
            (self.endpoint1, self.endpoint2),
            (Endpoint::Tail, Endpoint::Arrow) | (Endpoint::Arrow, Endpoint::Tail)
        )
    }

    /// True if this edge connects `a` and `b` in either orientation.
    pub fn connects(&self, a: &Node, b: &Node) -> bool {
        (&self.node1 == a && &self.node2 == b) || (&self.node1 == b && &self.node2 == a)
    }

    /// The endpoint opposite `node`, if `node` is on this edge.
    pub fn other(&self, node: &Node) -> Option<&Node> {
        if &self.node1 == node {
            Some(&self.node2)
        } else if &self.node2 == node {
            Some(&self.node1)
        } else {
            None
        }
    }

    pub fn endpoint_at(&self, node: &Node) -> Option<Endpoint> {
        if &self.node1 == node {
            Some(self.endpoint1)
        } else if &self.node2 == node {
            Some(self.endpoint2)
        } else {
            None
        }
    }

    /// True for a directed edge whose arrowhead is at `node`.
    pub fn points_into(&self, node: &Node) -> bool {
        self.is_directed() && self.endpoint_at(node) == Some(Endpoint::Arrow)
    }

    pub fn probability_of(&self, edge_type: EdgeType) -> Option<f64> {
        self.properties
            .iter()
            .find(|p| p.edge_type == edge_type)
            .map(|p| p.probability)
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.node1,
            self.endpoint1.symbol(true),
            self.endpoint2.symbol(false),
            self.node2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_edge_points_into_head_only() {
        let a = Node::new("A");
        let b = Node::new("B");
        let edge = Edge::directed(a.clone(), b.clone());
        assert!(edge.is_directed());
        assert!(edge.points_into(&b));
        assert!(!edge.points_into(&a));
        assert_eq!(edge.other(&a), Some(&b));
        assert_eq!(edge.to_string(), "A --> B");
    }

    #[test]
    fn undirected_edge_has_no_head() {
        let a = Node::new("A");
        let b = Node::new("B");
        let edge = Edge::undirected(a.clone(), b.clone());
        assert!(!edge.is_directed());
        assert!(!edge.points_into(&a));
        assert!(edge.connects(&b, &a));
        assert_eq!(edge.to_string(), "A --- B");
    }

    #[test]
    fn edge_type_probabilities_are_looked_up_by_type() {
        let edge = Edge::directed(Node::new("A"), Node::new("B")).with_properties(vec![
            EdgeTypeProbability {
                edge_type: EdgeType::DirectedForward,
                probability: 0.7,
            },
            EdgeTypeProbability {
                edge_type: EdgeType::Nil,
                probability: 0.3,
            },
        ]);
        assert_eq!(edge.probability_of(EdgeType::DirectedForward), Some(0.7));
        assert_eq!(edge.probability_of(EdgeType::Bidirected), None);
        assert_eq!(
            EdgeType::PartiallyDirected.endpoints(),
            Some((Endpoint::Circle, Endpoint::Arrow))
        );
    }
}
