use crate::error::ValidationError;
use crate::graph::link::Link;
use crate::graph::network::Network;
use crate::graph::node::{Node, NodeId, NodeKind};
use std::collections::HashMap;

pub const SUPER_SOURCE: &str = "super_source";
pub const SUPER_SINK: &str = "super_sink";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOrigin {
    /// `super_source -> source`
    Supply(NodeId),
    /// Index into the link list the graph was built from.
    Link(usize),
    /// `city -> super_sink`
    Demand(NodeId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: u64,
    pub origin: EdgeOrigin,
}

/// Single-commodity view of a network: real nodes, then the two synthetic terminals.
#[derive(Clone, Debug)]
pub struct AugmentedGraph {
    names: Vec<String>,
    edges: Vec<FlowEdge>,
}

impl AugmentedGraph {
    /// Raw constructor; no invariant is checked here, the solver checks what it needs.
    pub fn from_parts(names: Vec<String>, edges: Vec<FlowEdge>) -> Self {
        Self { names, edges }
    }

    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    pub fn vertex_name(&self, vertex: usize) -> &str {
        &self.names[vertex]
    }

    pub fn vertex_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }
}

/// The part of an augmented graph that only depends on the node set.
///
/// The optimizer builds this once and then assembles one graph per trial
/// link configuration.
#[derive(Clone, Debug)]
pub(crate) struct NodeFrame {
    names: Vec<String>,
    index: HashMap<String, usize>,
    supply: Vec<FlowEdge>,
    demand: Vec<FlowEdge>,
}

impl NodeFrame {
    pub fn new(nodes: &[Node]) -> Self {
        let n = nodes.len();
        let (source, sink) = (n, n + 1);
        let mut names: Vec<String> = nodes.iter().map(|n| n.name().to_string()).collect();
        names.push(SUPER_SOURCE.to_string());
        names.push(SUPER_SINK.to_string());
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        let mut supply = Vec::new();
        let mut demand = Vec::new();
        for (i, node) in nodes.iter().enumerate() {
            match node.kind() {
                NodeKind::Source { capacity } => supply.push(FlowEdge {
                    from: source,
                    to: i,
                    capacity: *capacity,
                    origin: EdgeOrigin::Supply(NodeId(i)),
                }),
                NodeKind::City { capacity } => demand.push(FlowEdge {
                    from: i,
                    to: sink,
                    capacity: *capacity,
                    origin: EdgeOrigin::Demand(NodeId(i)),
                }),
                NodeKind::Intermediate => {}
            }
        }
        Self {
            names,
            index,
            supply,
            demand,
        }
    }

    /// Links must already be validated against the frame's node set;
    /// a link naming an unknown vertex is skipped.
    pub fn graph(&self, links: &[Link]) -> AugmentedGraph {
        let mut edges = Vec::with_capacity(self.supply.len() + links.len() + self.demand.len());
        edges.extend(self.supply.iter().cloned());
        edges.extend(links.iter().enumerate().filter_map(|(i, link)| {
            let from = *self.index.get(link.from())?;
            let to = *self.index.get(link.to())?;
            Some(FlowEdge {
                from,
                to,
                capacity: link.capacity(),
                origin: EdgeOrigin::Link(i),
            })
        }));
        edges.extend(self.demand.iter().cloned());
        AugmentedGraph::from_parts(self.names.clone(), edges)
    }
}

/// Validates `(nodes, links)` and builds the augmented graph in one step.
#[allow(dead_code)]
pub fn build(nodes: &[Node], links: &[Link]) -> Result<AugmentedGraph, ValidationError> {
    Ok(Network::new(nodes.to_vec(), links.to_vec())?.augment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminals_and_synthetic_edges() {
        let nodes = vec![
            Node::source("A", 10),
            Node::intermediate("B"),
            Node::city("C", 15),
        ];
        let links = vec![Link::new("A", "B", 5), Link::new("B", "C", 10)];
        let graph = build(&nodes, &links).unwrap();

        assert_eq!(5, graph.vertex_count());
        assert_eq!(Some(3), graph.vertex_of(SUPER_SOURCE));
        assert_eq!(Some(4), graph.vertex_of(SUPER_SINK));

        let edges = graph.edges();
        assert_eq!(4, edges.len());
        assert_eq!(
            FlowEdge {
                from: 3,
                to: 0,
                capacity: 10,
                origin: EdgeOrigin::Supply(NodeId(0))
            },
            edges[0]
        );
        assert_eq!(EdgeOrigin::Link(0), edges[1].origin);
        assert_eq!(EdgeOrigin::Link(1), edges[2].origin);
        assert_eq!(
            FlowEdge {
                from: 2,
                to: 4,
                capacity: 15,
                origin: EdgeOrigin::Demand(NodeId(2))
            },
            edges[3]
        );
    }

    #[test]
    fn test_build_rejects_unknown_endpoint() {
        let nodes = vec![Node::source("A", 10)];
        let err = build(&nodes, &[Link::new("A", "X", 1)]).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownEndpoint { .. }));
    }

    #[test]
    fn test_build_does_not_touch_inputs() {
        let nodes = vec![Node::source("A", 10), Node::city("B", 4)];
        let links = vec![Link::new("A", "B", 3)];
        let before = (nodes.clone(), links.clone());
        build(&nodes, &links).unwrap();
        assert_eq!(before, (nodes, links));
    }
}
