use crate::error::ValidationError;
use crate::graph::link::{Link, LinkKey};
use crate::graph::network::Network;
use crate::graph::node::Node;
use crate::scenario::scenario::Scenario;

/// Four sources feeding three cities through five junctions.
pub struct BasicScenario;

impl Scenario for BasicScenario {
    fn name(&self) -> String {
        "demo".to_string()
    }

    fn network(&self) -> Result<Network, ValidationError> {
        let nodes = vec![
            Node::source("A", 15),
            Node::source("B", 15),
            Node::source("C", 15),
            Node::source("D", 10),
            Node::intermediate("E"),
            Node::intermediate("F"),
            Node::intermediate("G"),
            Node::intermediate("H"),
            Node::intermediate("I"),
            Node::city("J", 15),
            Node::city("K", 20),
            Node::city("L", 15),
        ];

        let links = vec![
            Link::new("A", "E", 7),
            Link::new("B", "F", 10),
            Link::new("B", "G", 7),
            Link::new("C", "A", 5),
            Link::new("C", "F", 5),
            Link::new("D", "G", 10),
            Link::new("E", "F", 5),
            Link::new("E", "H", 4),
            Link::new("E", "I", 15),
            Link::new("F", "G", 5),
            Link::new("F", "I", 15),
            Link::new("G", "I", 15),
            Link::new("H", "J", 7),
            Link::new("I", "K", 30),
            Link::new("I", "L", 4),
            Link::new("K", "J", 10),
        ];

        Network::new(nodes, links)
    }

    fn candidates(&self) -> Vec<LinkKey> {
        vec![LinkKey::new("A", "E"), LinkKey::new("I", "L")]
    }
}
