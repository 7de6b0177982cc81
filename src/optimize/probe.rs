use crate::error::SolverError;
use crate::flow::result::FlowResult;
use crate::flow::{self, MaxFlowAlgorithm};
use crate::graph::augmented::NodeFrame;
use crate::graph::link::{Link, LinkKey};
use crate::graph::network::Network;
use rayon::prelude::*;
use std::cmp::Reverse;

/// Set candidate `candidate` to `capacity` and measure the flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Trial {
    pub candidate: usize,
    pub capacity: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Outcome {
    pub trial: Trial,
    pub flow: u64,
}

impl Outcome {
    /// Higher flow first, then lower capacity, then earlier candidate.
    /// No two trials of a sweep share a rank.
    fn rank(&self) -> (u64, Reverse<u64>, Reverse<usize>) {
        (
            self.flow,
            Reverse(self.trial.capacity),
            Reverse(self.trial.candidate),
        )
    }
}

/// Evaluates trial link configurations against a fixed node set.
pub(crate) struct Prober {
    frame: NodeFrame,
    algorithm: MaxFlowAlgorithm,
    parallel: bool,
}

impl Prober {
    pub fn new(network: &Network, algorithm: MaxFlowAlgorithm, parallel: bool) -> Self {
        Self {
            frame: NodeFrame::new(network.nodes()),
            algorithm,
            parallel,
        }
    }

    pub fn result(&self, links: &[Link]) -> Result<FlowResult, SolverError> {
        flow::solve_with(self.algorithm, &self.frame.graph(links))
    }

    pub fn flow(&self, links: &[Link]) -> Result<u64, SolverError> {
        Ok(self.result(links)?.total_flow())
    }

    /// Best trial of the sweep; `None` when there is nothing to try.
    ///
    /// Trials only read `links`, so they run on the rayon pool when enabled.
    /// The reduction is a total order, so the winner does not depend on
    /// which thread finishes first.
    pub fn sweep(
        &self,
        links: &[Link],
        candidates: &[LinkKey],
        trials: &[Trial],
    ) -> Result<Option<Outcome>, SolverError> {
        let run = |trial: &Trial| -> Result<Outcome, SolverError> {
            let configuration =
                with_capacity(links, &candidates[trial.candidate], trial.capacity);
            Ok(Outcome {
                trial: *trial,
                flow: self.flow(&configuration)?,
            })
        };
        let outcomes: Vec<Outcome> = if self.parallel {
            trials.par_iter().map(run).collect::<Result<_, _>>()?
        } else {
            trials.iter().map(run).collect::<Result<_, _>>()?
        };
        Ok(outcomes.into_iter().max_by_key(Outcome::rank))
    }
}

pub(crate) fn current_capacity(links: &[Link], key: &LinkKey) -> Option<u64> {
    links
        .iter()
        .find(|l| l.connects(&key.from, &key.to))
        .map(Link::capacity)
}

/// Copy of `links` where `key` has `capacity`, appended if it did not exist.
pub(crate) fn with_capacity(links: &[Link], key: &LinkKey, capacity: u64) -> Vec<Link> {
    let mut configuration = links.to_vec();
    set_capacity(&mut configuration, key, capacity);
    configuration
}

pub(crate) fn set_capacity(links: &mut Vec<Link>, key: &LinkKey, capacity: u64) {
    match links.iter_mut().find(|l| l.connects(&key.from, &key.to)) {
        Some(link) => *link = link.with_capacity(capacity),
        None => links.push(Link::new(key.from.as_str(), key.to.as_str(), capacity)),
    }
}

/// Candidate-major trial list; `capacities` maps a link's current capacity
/// (0 when absent) to the capacities worth probing, in ascending order.
pub(crate) fn plan<F>(links: &[Link], candidates: &[LinkKey], capacities: F) -> Vec<Trial>
where
    F: Fn(u64) -> Vec<u64>,
{
    candidates
        .iter()
        .enumerate()
        .flat_map(|(candidate, key)| {
            capacities(current_capacity(links, key).unwrap_or(0))
                .into_iter()
                .map(move |capacity| Trial {
                    candidate,
                    capacity,
                })
        })
        .collect()
}

/// First occurrence of each pair, caller's order kept.
pub(crate) fn distinct(keys: &[LinkKey]) -> Vec<LinkKey> {
    let mut unique: Vec<LinkKey> = Vec::with_capacity(keys.len());
    for key in keys {
        if !unique.contains(key) {
            unique.push(key.clone());
        }
    }
    unique
}

/// Caps the number of max-flow evaluations of one optimization call.
pub(crate) struct TrialBudget {
    limit: Option<usize>,
    spent: usize,
}

impl TrialBudget {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit, spent: 0 }
    }

    /// How many of `wanted` trials may run.
    pub fn grant(&mut self, wanted: usize) -> usize {
        let granted = match self.limit {
            Some(limit) => wanted.min(limit.saturating_sub(self.spent)),
            None => wanted,
        };
        self.spent = self.spent.saturating_add(granted);
        granted
    }

    pub fn spent(&self) -> usize {
        self.spent
    }
}
