use crate::error::Result;
use crate::flow::MaxFlowAlgorithm;
use crate::graph::link::{Link, LinkKey};
use crate::graph::network::Network;
use crate::optimize::probe::{self, Prober, TrialBudget};
use crate::optimize::work::WorkItem;
use log::{debug, info};

#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub min_capacity: u64,
    pub max_capacity: u64,
    pub algorithm: MaxFlowAlgorithm,
    /// Evaluate the trials of a sweep on the rayon pool.
    pub parallel: bool,
    /// Max-flow evaluations allowed per call, unbounded when `None`.
    pub trial_budget: Option<usize>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            min_capacity: 1,
            max_capacity: 20,
            algorithm: MaxFlowAlgorithm::default(),
            parallel: true,
            trial_budget: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Optimization {
    pub links: Vec<Link>,
    pub work_items: Vec<WorkItem>,
    pub baseline_flow: u64,
    pub final_flow: u64,
    pub trials: usize,
    pub budget_exhausted: bool,
}

/// Greedy capacity assignment over a fixed candidate set.
///
/// Each pass sweeps every remaining candidate over the capacity range and
/// accepts the single best trial if it strictly raises the total flow. An
/// accepted candidate leaves the set, so each link changes at most once.
/// Ties go to the lower capacity, then to the candidate listed first.
pub fn optimize_links(
    network: &Network,
    candidates: &[LinkKey],
    config: &OptimizerConfig,
) -> Result<Optimization> {
    for key in candidates {
        network.check_key(key)?;
    }
    let mut remaining = probe::distinct(candidates);

    let prober = Prober::new(network, config.algorithm, config.parallel);
    let mut links = network.links().to_vec();
    let baseline_flow = prober.flow(&links)?;
    let mut current = baseline_flow;
    let mut budget = TrialBudget::new(config.trial_budget);
    let mut work_items = Vec::new();
    let mut budget_exhausted = false;

    info!(
        "optimizing {} candidate links, capacities {}..={}, baseline flow {}",
        remaining.len(),
        config.min_capacity,
        config.max_capacity,
        baseline_flow
    );

    while !remaining.is_empty() {
        let mut trials = probe::plan(&links, &remaining, |existing| {
            (config.min_capacity.max(existing.saturating_add(1))..=config.max_capacity).collect()
        });
        if trials.is_empty() {
            break;
        }
        let granted = budget.grant(trials.len());
        if granted < trials.len() {
            trials.truncate(granted);
            budget_exhausted = true;
        }
        debug!(
            "sweep over {} candidates, {} trials",
            remaining.len(),
            trials.len()
        );

        match prober.sweep(&links, &remaining, &trials)? {
            Some(best) if best.flow > current => {
                let key = remaining.remove(best.trial.candidate);
                probe::set_capacity(&mut links, &key, best.trial.capacity);
                current = best.flow;
                info!(
                    "{key} set to {} units, total flow {current}",
                    best.trial.capacity
                );
                work_items.push(WorkItem::new(key, best.trial.capacity, current));
            }
            _ => {
                debug!("no trial improves flow {current}");
                break;
            }
        }
        if budget_exhausted {
            info!("trial budget exhausted after {} trials", budget.spent());
            break;
        }
    }

    Ok(Optimization {
        links,
        work_items,
        baseline_flow,
        final_flow: current,
        trials: budget.spent(),
        budget_exhausted,
    })
}
