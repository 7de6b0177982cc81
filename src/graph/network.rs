use crate::error::ValidationError;
use crate::graph::augmented::{AugmentedGraph, NodeFrame, SUPER_SINK, SUPER_SOURCE};
use crate::graph::link::{Link, LinkKey};
use crate::graph::node::{Node, NodeId};
use std::collections::{HashMap, HashSet};

/// A validated `(nodes, links)` pair.
///
/// Node names are unique, every link joins two distinct known nodes and no
/// ordered pair appears twice. Every constructor enforces this, so consumers
/// never re-check it.
#[derive(Clone, Debug)]
pub struct Network {
    nodes: Vec<Node>,
    links: Vec<Link>,
    index: HashMap<String, NodeId>,
}

impl Network {
    pub fn new(nodes: Vec<Node>, links: Vec<Link>) -> Result<Self, ValidationError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if node.name() == SUPER_SOURCE || node.name() == SUPER_SINK {
                return Err(ValidationError::ReservedName(node.name().to_string()));
            }
            if index.insert(node.name().to_string(), NodeId(i)).is_some() {
                return Err(ValidationError::DuplicateNode(node.name().to_string()));
            }
        }
        let network = Self {
            nodes,
            links: Vec::new(),
            index,
        };
        network.with_links(links)
    }

    /// Same nodes, another link configuration.
    pub fn with_links(&self, links: Vec<Link>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(links.len());
        for link in &links {
            self.check_pair(link.from(), link.to())?;
            if !seen.insert((link.from(), link.to())) {
                return Err(ValidationError::DuplicateLink {
                    from: link.from().to_string(),
                    to: link.to().to_string(),
                });
            }
        }
        Ok(Self {
            nodes: self.nodes.clone(),
            links,
            index: self.index.clone(),
        })
    }

    /// Checks that a prospective link could be added: both ends known and distinct.
    pub fn check_key(&self, key: &LinkKey) -> Result<(), ValidationError> {
        self.check_pair(&key.from, &key.to)
    }

    fn check_pair(&self, from: &str, to: &str) -> Result<(), ValidationError> {
        for end in [from, to] {
            if !self.index.contains_key(end) {
                return Err(ValidationError::UnknownEndpoint {
                    from: from.to_string(),
                    to: to.to_string(),
                    missing: end.to_string(),
                });
            }
        }
        if from == to {
            return Err(ValidationError::SelfLoop(from.to_string()));
        }
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node_by_id(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.id_of(name).map(|id| self.node_by_id(id))
    }

    pub fn link(&self, key: &LinkKey) -> Option<&Link> {
        self.links.iter().find(|l| l.connects(&key.from, &key.to))
    }

    pub fn sources(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_source())
    }

    pub fn cities(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_city())
    }

    pub fn total_supply(&self) -> u64 {
        self.sources().map(Node::capacity).fold(0, u64::saturating_add)
    }

    /// Default objective of a satisfaction run.
    pub fn total_demand(&self) -> u64 {
        self.cities().map(Node::capacity).fold(0, u64::saturating_add)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Changes the output of a source or the demand of a city between computations.
    pub fn set_capacity(&mut self, name: &str, capacity: u64) -> Result<(), ValidationError> {
        let id = self
            .id_of(name)
            .ok_or_else(|| ValidationError::UnknownNode(name.to_string()))?;
        if self.nodes[id.index()].set_capacity(capacity) {
            Ok(())
        } else {
            Err(ValidationError::NoCapacity(name.to_string()))
        }
    }

    pub fn augment(&self) -> AugmentedGraph {
        NodeFrame::new(&self.nodes).graph(&self.links)
    }
}
