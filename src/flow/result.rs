use crate::graph::augmented::{SUPER_SINK, SUPER_SOURCE};
use crate::graph::link::{Link, LinkKey};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of one max-flow computation.
///
/// `flows` holds every edge of the augmented graph, the synthetic
/// `super_source -> source` and `city -> super_sink` edges included.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlowResult {
    total_flow: u64,
    flows: BTreeMap<LinkKey, u64>,
    source_side: BTreeSet<String>,
}

impl FlowResult {
    pub(crate) fn new(
        total_flow: u64,
        flows: BTreeMap<LinkKey, u64>,
        source_side: BTreeSet<String>,
    ) -> Self {
        Self {
            total_flow,
            flows,
            source_side,
        }
    }

    pub fn total_flow(&self) -> u64 {
        self.total_flow
    }

    pub fn flow_by_link(&self) -> &BTreeMap<LinkKey, u64> {
        &self.flows
    }

    /// Zero for pairs that are not edges of the graph.
    pub fn flow_on(&self, from: &str, to: &str) -> u64 {
        self.flows
            .get(&LinkKey::new(from, to))
            .copied()
            .unwrap_or(0)
    }

    pub fn link_flow(&self, link: &Link) -> u64 {
        self.flow_on(link.from(), link.to())
    }

    /// What a source actually sends into the network.
    pub fn delivered_by(&self, source: &str) -> u64 {
        self.flow_on(SUPER_SOURCE, source)
    }

    /// What a city actually receives.
    pub fn received_by(&self, city: &str) -> u64 {
        self.flow_on(city, SUPER_SINK)
    }

    /// Vertices still reachable from `super_source` in the final residual graph.
    pub fn source_side(&self) -> &BTreeSet<String> {
        &self.source_side
    }

    /// Real links crossing the minimum cut. Their capacities sum to the
    /// total flow minus whatever the synthetic edges contribute to the cut.
    pub fn cut_links<'a>(&self, links: &'a [Link]) -> Vec<&'a Link> {
        links
            .iter()
            .filter(|l| self.source_side.contains(l.from()) && !self.source_side.contains(l.to()))
            .collect()
    }
}
