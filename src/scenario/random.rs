use crate::error::ValidationError;
use crate::graph::link::{Link, LinkKey};
use crate::graph::network::Network;
use crate::graph::node::Node;
use crate::scenario::scenario::Scenario;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded layered network: sources, junction layers, cities.
///
/// Every node of a layer gets at least one link into the next layer, a few
/// links skip a layer and a few point backwards so the graph has cycles.
pub struct RandomScenario {
    seed: u64,
    sources: usize,
    layers: usize,
    layer_width: usize,
    cities: usize,
}

impl RandomScenario {
    pub fn new(seed: u64) -> Self {
        Self::with_shape(seed, 3, 2, 4, 3)
    }

    pub fn with_shape(
        seed: u64,
        sources: usize,
        layers: usize,
        layer_width: usize,
        cities: usize,
    ) -> Self {
        Self {
            seed,
            sources: sources.max(1),
            layers,
            layer_width: layer_width.max(1),
            cities: cities.max(1),
        }
    }

    fn generate(&self) -> (Vec<Node>, Vec<Link>) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut nodes = Vec::new();
        let mut layers: Vec<Vec<usize>> = Vec::new();

        let mut push_layer = |nodes: &mut Vec<Node>, layer: Vec<Node>| {
            let start = nodes.len();
            let ids = (start..start + layer.len()).collect();
            nodes.extend(layer);
            layers.push(ids);
        };

        let sources = (0..self.sources)
            .map(|i| Node::source(format!("S{i}"), rng.gen_range(5..=20)))
            .collect();
        push_layer(&mut nodes, sources);
        for l in 0..self.layers {
            let junctions = (0..self.layer_width)
                .map(|i| Node::intermediate(format!("J{l}.{i}")))
                .collect();
            push_layer(&mut nodes, junctions);
        }
        let cities = (0..self.cities)
            .map(|i| Node::city(format!("C{i}"), rng.gen_range(5..=20)))
            .collect();
        push_layer(&mut nodes, cities);

        let count = nodes.len();
        let mut has_edge = vec![vec![false; count]; count];
        let mut links = Vec::new();
        let mut add_link = |rng: &mut StdRng, from: usize, to: usize| {
            if from == to || has_edge[from][to] {
                return;
            }
            has_edge[from][to] = true;
            links.push(Link::new(
                nodes[from].name().to_string(),
                nodes[to].name().to_string(),
                rng.gen_range(1..=15),
            ));
        };

        for pair in layers.windows(2) {
            let (current, next) = (&pair[0], &pair[1]);
            for &from in current {
                let fan_out = rng.gen_range(1..=2);
                for _ in 0..fan_out {
                    let to = next[rng.gen_range(0..next.len())];
                    add_link(&mut rng, from, to);
                }
            }
            // nobody in the next layer is left without a feed
            for &to in next {
                let from = current[rng.gen_range(0..current.len())];
                add_link(&mut rng, from, to);
            }
        }

        let extra = count / 3;
        for _ in 0..extra {
            let a = rng.gen_range(0..layers.len());
            let b = rng.gen_range(0..layers.len());
            let from = layers[a][rng.gen_range(0..layers[a].len())];
            let to = layers[b][rng.gen_range(0..layers[b].len())];
            add_link(&mut rng, from, to);
        }

        (nodes, links)
    }
}

impl Scenario for RandomScenario {
    fn name(&self) -> String {
        format!("random-{}", self.seed)
    }

    fn network(&self) -> Result<Network, ValidationError> {
        let (nodes, links) = self.generate();
        Network::new(nodes, links)
    }

    /// The links feeding the cities, where shortfalls usually sit.
    fn candidates(&self) -> Vec<LinkKey> {
        let (nodes, links) = self.generate();
        links
            .iter()
            .filter(|l| nodes.iter().any(|n| n.is_city() && n.name() == l.to()))
            .map(Link::key)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_network() {
        let a = RandomScenario::new(11).network().unwrap();
        let b = RandomScenario::new(11).network().unwrap();
        assert_eq!(a.nodes(), b.nodes());
        assert_eq!(a.links(), b.links());
    }

    #[test]
    fn test_every_layer_is_fed() {
        for seed in 0..20 {
            let network = RandomScenario::with_shape(seed, 2, 3, 3, 2).network().unwrap();
            assert_eq!(2 + 3 * 3 + 2, network.node_count());
            for node in network.nodes().iter().filter(|n| !n.is_source()) {
                assert!(
                    network.links().iter().any(|l| l.to() == node.name()),
                    "{} has no inbound link (seed {seed})",
                    node.name()
                );
            }
        }
    }

    #[test]
    fn test_candidates_end_at_cities() {
        let scenario = RandomScenario::new(3);
        let network = scenario.network().unwrap();
        let candidates = scenario.candidates();
        assert!(!candidates.is_empty());
        for key in candidates {
            assert!(network.node_by_name(&key.to).unwrap().is_city());
            assert!(network.link(&key).is_some());
        }
    }
}
