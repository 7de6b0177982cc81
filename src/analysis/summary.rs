use crate::flow::result::FlowResult;
use crate::graph::link::Link;
use crate::graph::network::Network;
use crate::graph::node::{Node, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// How well a city is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceLevel {
    Full,
    Partial,
    Poor,
    Dry,
}

/// Aggregate over all nodes of one kind.
///
/// For sources `capacity` is total supply and `throughput` what they deliver;
/// for cities total demand and what they receive; for junctions the summed
/// capacity of the links entering them and the flow passing through.
pub struct KindSummary {
    label: &'static str,
    node_count: usize,
    capacity: u64,
    throughput: u64,
    utilization: f64,
    trend: Trend,
}

impl KindSummary {
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn throughput(&self) -> u64 {
        self.throughput
    }

    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }
}

pub struct CitySummary {
    name: String,
    demand: u64,
    received: u64,
    level: ServiceLevel,
}

impl CitySummary {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn demand(&self) -> u64 {
        self.demand
    }

    pub fn received(&self) -> u64 {
        self.received
    }

    pub fn shortfall(&self) -> u64 {
        self.demand.saturating_sub(self.received)
    }

    pub fn ratio(&self) -> f64 {
        ratio(self.received, self.demand)
    }

    pub fn level(&self) -> ServiceLevel {
        self.level
    }
}

pub struct LinkUsage<'a> {
    pub link: &'a Link,
    pub flow: u64,
    pub utilization: f64,
}

impl LinkUsage<'_> {
    pub fn is_saturated(&self) -> bool {
        self.link.capacity() > 0 && self.flow == self.link.capacity()
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64
    } else {
        0.0
    }
}

fn trend(previous: f64, current: f64) -> Trend {
    let epsilon = 0.02;
    let diff = current - previous;
    if diff > epsilon {
        Trend::Up
    } else if diff < -epsilon {
        Trend::Down
    } else {
        Trend::Flat
    }
}

fn inbound_capacity(network: &Network, node: &Node) -> u64 {
    network
        .links()
        .iter()
        .filter(|l| l.to() == node.name())
        .map(Link::capacity)
        .fold(0, u64::saturating_add)
}

fn kind_totals(
    network: &Network,
    flow: &FlowResult,
    matches: fn(&NodeKind) -> bool,
) -> (usize, u64, u64) {
    network
        .nodes()
        .iter()
        .filter(|n| matches(n.kind()))
        .map(|n| match n.kind() {
            NodeKind::Source { capacity } => (*capacity, flow.delivered_by(n.name())),
            NodeKind::City { capacity } => (*capacity, flow.received_by(n.name())),
            NodeKind::Intermediate => {
                let through = network
                    .links()
                    .iter()
                    .filter(|l| l.to() == n.name())
                    .map(|l| flow.link_flow(l))
                    .fold(0, u64::saturating_add);
                (inbound_capacity(network, n), through)
            }
        })
        .fold((0, 0, 0), |(count, cap, thr), (c, t)| {
            (count + 1, cap.saturating_add(c), thr.saturating_add(t))
        })
}

/// Source, junction and city aggregates, with utilization trends against `previous`.
pub fn summarize_kinds(
    network: &Network,
    current: &FlowResult,
    previous: &FlowResult,
) -> Vec<KindSummary> {
    let kinds: [(&'static str, fn(&NodeKind) -> bool); 3] = [
        ("Sources", |k| matches!(k, NodeKind::Source { .. })),
        ("Junctions", |k| matches!(k, NodeKind::Intermediate)),
        ("Cities", |k| matches!(k, NodeKind::City { .. })),
    ];
    kinds
        .into_iter()
        .map(|(label, matches)| {
            let (node_count, capacity, throughput) = kind_totals(network, current, matches);
            let (_, _, previous_throughput) = kind_totals(network, previous, matches);
            let utilization = ratio(throughput, capacity);
            KindSummary {
                label,
                node_count,
                capacity,
                throughput,
                utilization,
                trend: trend(ratio(previous_throughput, capacity), utilization),
            }
        })
        .collect()
}

pub fn summarize_cities(network: &Network, flow: &FlowResult) -> Vec<CitySummary> {
    network
        .cities()
        .map(|city| {
            let demand = city.capacity();
            let received = flow.received_by(city.name());
            let level = match ratio(received, demand) {
                _ if received >= demand => ServiceLevel::Full,
                r if r > 0.5 => ServiceLevel::Partial,
                r if r > 0.0 => ServiceLevel::Poor,
                _ => ServiceLevel::Dry,
            };
            CitySummary {
                name: city.name().to_string(),
                demand,
                received,
                level,
            }
        })
        .collect()
}

/// Every link with its flow, most utilized first.
pub fn link_usage<'a>(links: &'a [Link], flow: &FlowResult) -> Vec<LinkUsage<'a>> {
    let mut usage: Vec<LinkUsage> = links
        .iter()
        .map(|link| {
            let carried = flow.link_flow(link);
            LinkUsage {
                link,
                flow: carried,
                utilization: ratio(carried, link.capacity()),
            }
        })
        .collect();
    usage.sort_by(|a, b| b.utilization.total_cmp(&a.utilization));
    usage
}
