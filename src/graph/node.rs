use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Role of a node in the supply network.
///
/// Capacity only exists where it means something: the maximum output of a
/// source and the maximum demand of a city. Junctions route flow unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    Source { capacity: u64 },
    City { capacity: u64 },
    Intermediate,
}

impl NodeKind {
    pub fn capacity(&self) -> Option<u64> {
        match self {
            NodeKind::Source { capacity } | NodeKind::City { capacity } => Some(*capacity),
            NodeKind::Intermediate => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    name: String,
    #[serde(flatten)]
    kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn source(name: impl Into<String>, capacity: u64) -> Self {
        Self::new(name, NodeKind::Source { capacity })
    }

    pub fn city(name: impl Into<String>, capacity: u64) -> Self {
        Self::new(name, NodeKind::City { capacity })
    }

    pub fn intermediate(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Intermediate)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Zero for junctions.
    pub fn capacity(&self) -> u64 {
        self.kind.capacity().unwrap_or(0)
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source { .. })
    }

    pub fn is_city(&self) -> bool {
        matches!(self.kind, NodeKind::City { .. })
    }

    /// Returns false for junctions, which have no capacity to change.
    pub(crate) fn set_capacity(&mut self, value: u64) -> bool {
        match &mut self.kind {
            NodeKind::Source { capacity } | NodeKind::City { capacity } => {
                *capacity = value;
                true
            }
            NodeKind::Intermediate => false,
        }
    }
}
