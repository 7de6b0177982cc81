use crate::error::ValidationError;
use crate::graph::network::Network;
use rand::Rng;
use rand::seq::SliceRandom;

/// What-if: a source loses part or all of its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Drought {
    source: String,
    remaining: u64,
}

impl Drought {
    pub fn new(source: impl Into<String>, remaining: u64) -> Self {
        Self {
            source: source.into(),
            remaining,
        }
    }

    /// The source dries up completely.
    pub fn total(source: impl Into<String>) -> Self {
        Self::new(source, 0)
    }

    /// A full drought on a source picked uniformly; `None` without sources.
    pub fn random<R: Rng + ?Sized>(network: &Network, rng: &mut R) -> Option<Self> {
        let sources: Vec<&str> = network.sources().map(|s| s.name()).collect();
        sources.choose(rng).map(|name| Self::total(*name))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Returns the capacity the source had before.
    pub fn apply(&self, network: &mut Network) -> Result<u64, ValidationError> {
        let node = network
            .node_by_name(&self.source)
            .ok_or_else(|| ValidationError::UnknownNode(self.source.clone()))?;
        if !node.is_source() {
            return Err(ValidationError::NotASource(self.source.clone()));
        }
        let previous = node.capacity();
        network.set_capacity(&self.source, self.remaining)?;
        Ok(previous)
    }
}
