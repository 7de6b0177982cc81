//! Exact maximum flow over an augmented graph.
//!
//! Both algorithms work on the same paired-arc residual network and return
//! the same flow value; they may disagree on which edges carry it. For a
//! given algorithm and graph the assignment is reproducible, which the
//! optimizer relies on when comparing trials.

mod dinic;
mod edmonds_karp;
mod residual;
pub mod result;

use crate::error::SolverError;
use crate::graph::augmented::{AugmentedGraph, SUPER_SINK, SUPER_SOURCE};
use crate::graph::link::LinkKey;
use residual::ResidualNetwork;
use result::FlowResult;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MaxFlowAlgorithm {
    /// Blocking flows on BFS level graphs, O(V^2 E)
    #[default]
    Dinic,
    /// BFS shortest augmenting paths, O(V E^2)
    EdmondsKarp,
}

/// Max flow between the synthetic terminals, with Dinic.
#[allow(dead_code)]
pub fn solve(graph: &AugmentedGraph) -> Result<FlowResult, SolverError> {
    solve_with(MaxFlowAlgorithm::default(), graph)
}

pub fn solve_with(
    algorithm: MaxFlowAlgorithm,
    graph: &AugmentedGraph,
) -> Result<FlowResult, SolverError> {
    let source = graph
        .vertex_of(SUPER_SOURCE)
        .ok_or(SolverError::MissingTerminal(SUPER_SOURCE))?;
    let sink = graph
        .vertex_of(SUPER_SINK)
        .ok_or(SolverError::MissingTerminal(SUPER_SINK))?;
    max_flow_with(algorithm, graph, source, sink)
}

#[allow(dead_code)]
pub fn max_flow(
    graph: &AugmentedGraph,
    source: usize,
    sink: usize,
) -> Result<FlowResult, SolverError> {
    max_flow_with(MaxFlowAlgorithm::default(), graph, source, sink)
}

pub fn max_flow_with(
    algorithm: MaxFlowAlgorithm,
    graph: &AugmentedGraph,
    source: usize,
    sink: usize,
) -> Result<FlowResult, SolverError> {
    let vertex_count = graph.vertex_count();
    let out_of_range = |vertex: usize| SolverError::VertexOutOfRange {
        vertex,
        vertex_count,
    };
    for vertex in [source, sink] {
        if vertex >= vertex_count {
            return Err(out_of_range(vertex));
        }
    }
    if source == sink {
        return Err(SolverError::SameTerminals(source));
    }

    let mut net = ResidualNetwork::new(vertex_count);
    let mut arcs = Vec::with_capacity(graph.edges().len());
    for edge in graph.edges() {
        if edge.from >= vertex_count {
            return Err(out_of_range(edge.from));
        }
        if edge.to >= vertex_count {
            return Err(out_of_range(edge.to));
        }
        arcs.push(net.add_edge(edge.from, edge.to, edge.capacity));
    }

    let total_flow = match algorithm {
        MaxFlowAlgorithm::Dinic => dinic::run(&mut net, source, sink),
        MaxFlowAlgorithm::EdmondsKarp => edmonds_karp::run(&mut net, source, sink),
    };

    let flows: BTreeMap<LinkKey, u64> = graph
        .edges()
        .iter()
        .zip(&arcs)
        .map(|(edge, &arc)| {
            (
                LinkKey::new(graph.vertex_name(edge.from), graph.vertex_name(edge.to)),
                net.flow(arc),
            )
        })
        .collect();

    let source_side: BTreeSet<String> = net
        .reachable(source)
        .iter()
        .enumerate()
        .filter(|(_, reached)| **reached)
        .map(|(v, _)| graph.vertex_name(v).to_string())
        .collect();

    Ok(FlowResult::new(total_flow, flows, source_side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::augmented::{EdgeOrigin, FlowEdge};
    use crate::graph::link::Link;
    use crate::graph::network::Network;
    use crate::graph::node::Node;
    use crate::scenario::basic::BasicScenario;
    use crate::scenario::random::RandomScenario;
    use crate::scenario::scenario::Scenario;

    const ALGORITHMS: [MaxFlowAlgorithm; 2] =
        [MaxFlowAlgorithm::Dinic, MaxFlowAlgorithm::EdmondsKarp];

    fn flow_of(nodes: Vec<Node>, links: Vec<Link>) -> FlowResult {
        solve(&Network::new(nodes, links).unwrap().augment()).unwrap()
    }

    #[test]
    fn test_single_link() {
        let result = flow_of(
            vec![Node::source("A", 10), Node::city("B", 10)],
            vec![Link::new("A", "B", 10)],
        );
        assert_eq!(10, result.total_flow());
        assert_eq!(10, result.flow_on("A", "B"));
        assert_eq!(10, result.delivered_by("A"));
        assert_eq!(10, result.received_by("B"));
    }

    #[test]
    fn test_bottleneck_on_first_link() {
        let result = flow_of(
            vec![
                Node::source("A", 10),
                Node::intermediate("B"),
                Node::city("C", 15),
            ],
            vec![Link::new("A", "B", 5), Link::new("B", "C", 10)],
        );
        assert_eq!(5, result.total_flow());
        assert_eq!(5, result.flow_on("B", "C"));
    }

    #[test]
    fn test_no_links_no_flow() {
        let result = flow_of(
            vec![
                Node::source("A", 10),
                Node::intermediate("B"),
                Node::city("C", 15),
            ],
            vec![],
        );
        assert_eq!(0, result.total_flow());
        assert!(result.flow_by_link().values().all(|f| *f == 0));
    }

    #[test]
    fn test_unreachable_city() {
        let result = flow_of(
            vec![
                Node::source("A", 10),
                Node::intermediate("B"),
                Node::city("C", 15),
            ],
            vec![Link::new("C", "B", 7), Link::new("B", "A", 7)],
        );
        assert_eq!(0, result.total_flow());
    }

    #[test]
    fn test_node_capacities_bound_flow() {
        // links are generous, the source and the city are not
        let result = flow_of(
            vec![Node::source("A", 4), Node::city("B", 9)],
            vec![Link::new("A", "B", 100)],
        );
        assert_eq!(4, result.total_flow());

        let result = flow_of(
            vec![Node::source("A", 40), Node::city("B", 9)],
            vec![Link::new("A", "B", 100)],
        );
        assert_eq!(9, result.total_flow());
    }

    #[test]
    fn test_total_flow_saturates() {
        let network = Network::new(
            vec![
                Node::source("A", u64::MAX),
                Node::source("B", u64::MAX),
                Node::city("X", u64::MAX),
                Node::city("Y", u64::MAX),
            ],
            vec![Link::new("A", "X", u64::MAX), Link::new("B", "Y", u64::MAX)],
        )
        .unwrap();
        for algorithm in ALGORITHMS {
            let result = solve_with(algorithm, &network.augment()).unwrap();
            assert_eq!(u64::MAX, result.total_flow(), "{algorithm:?}");
            assert_eq!(u64::MAX, result.flow_on("A", "X"));
            assert_eq!(u64::MAX, result.flow_on("B", "Y"));
        }
    }

    #[test]
    fn test_demo_network_value() {
        let network = BasicScenario.network().unwrap();
        for algorithm in ALGORITHMS {
            let result = solve_with(algorithm, &network.augment()).unwrap();
            assert_eq!(37, result.total_flow(), "{algorithm:?}");
        }
    }

    #[test]
    fn test_min_cut_matches_flow() {
        let graph = BasicScenario.network().unwrap().augment();
        let result = solve(&graph).unwrap();
        let side = result.source_side();
        let cut: u64 = graph
            .edges()
            .iter()
            .filter(|e| {
                side.contains(graph.vertex_name(e.from)) && !side.contains(graph.vertex_name(e.to))
            })
            .map(|e| e.capacity)
            .sum();
        assert_eq!(result.total_flow(), cut);
        assert!(side.contains(SUPER_SOURCE));
        assert!(!side.contains(SUPER_SINK));
    }

    #[test]
    fn test_missing_terminal() {
        let graph = AugmentedGraph::from_parts(vec!["A".into(), SUPER_SOURCE.into()], vec![]);
        assert_eq!(
            Err(SolverError::MissingTerminal(SUPER_SINK)),
            solve(&graph)
        );
    }

    #[test]
    fn test_edge_out_of_range() {
        let graph = AugmentedGraph::from_parts(
            vec![SUPER_SOURCE.into(), SUPER_SINK.into()],
            vec![FlowEdge {
                from: 0,
                to: 7,
                capacity: 1,
                origin: EdgeOrigin::Link(0),
            }],
        );
        assert_eq!(
            Err(SolverError::VertexOutOfRange {
                vertex: 7,
                vertex_count: 2
            }),
            solve(&graph)
        );
        assert_eq!(Err(SolverError::SameTerminals(1)), max_flow(&graph, 1, 1));
    }

    #[test]
    fn test_random_networks_properties() {
        for seed in 0..40 {
            let network = RandomScenario::new(seed).network().unwrap();
            let graph = network.augment();
            let dinic = solve_with(MaxFlowAlgorithm::Dinic, &graph).unwrap();
            let karp = solve_with(MaxFlowAlgorithm::EdmondsKarp, &graph).unwrap();

            assert_eq!(dinic.total_flow(), karp.total_flow(), "seed {seed}");
            assert!(dinic.total_flow() <= network.total_supply());
            assert!(dinic.total_flow() <= network.total_demand());

            for edge in graph.edges() {
                let key = LinkKey::new(graph.vertex_name(edge.from), graph.vertex_name(edge.to));
                assert!(dinic.flow_by_link()[&key] <= edge.capacity);
            }

            for node in network.nodes() {
                let inflow: u64 = dinic
                    .flow_by_link()
                    .iter()
                    .filter(|(k, _)| k.to == node.name())
                    .map(|(_, f)| f)
                    .sum();
                let outflow: u64 = dinic
                    .flow_by_link()
                    .iter()
                    .filter(|(k, _)| k.from == node.name())
                    .map(|(_, f)| f)
                    .sum();
                assert_eq!(inflow, outflow, "conservation at {} (seed {seed})", node.name());
            }

            let delivered: u64 = network.sources().map(|s| dinic.delivered_by(s.name())).sum();
            let received: u64 = network.cities().map(|c| dinic.received_by(c.name())).sum();
            assert_eq!(dinic.total_flow(), delivered);
            assert_eq!(dinic.total_flow(), received);
        }
    }

    #[test]
    fn test_recompute_is_identical() {
        let graph = RandomScenario::new(7).network().unwrap().augment();
        for algorithm in ALGORITHMS {
            let first = solve_with(algorithm, &graph).unwrap();
            let second = solve_with(algorithm, &graph).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_raising_one_link_never_lowers_flow() {
        for seed in 0..10 {
            let network = RandomScenario::new(seed).network().unwrap();
            let base = solve(&network.augment()).unwrap().total_flow();
            for i in 0..network.links().len() {
                let mut links = network.links().to_vec();
                links[i] = links[i].with_capacity(links[i].capacity() + 5);
                let raised = network.with_links(links).unwrap();
                assert!(solve(&raised.augment()).unwrap().total_flow() >= base);
            }
        }
    }
}
