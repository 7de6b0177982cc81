use crate::analysis::saturation::saturated_links;
use crate::error::Result;
use crate::flow::MaxFlowAlgorithm;
use crate::graph::link::{Link, LinkKey};
use crate::graph::network::Network;
use crate::optimize::probe::{self, Prober, TrialBudget};
use crate::optimize::work::WorkItem;
use log::{debug, info, trace};

/// Where each round draws its candidate links from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidatePool {
    /// These pairs, which may name links the network lacks.
    Fixed(Vec<LinkKey>),
    /// The links saturated by the flow at the start of each round.
    Saturated,
}

#[derive(Debug, Clone)]
pub struct SatisfactionConfig {
    /// Total flow to reach; total city demand when `None`.
    pub target: Option<u64>,
    pub cap_ceiling: u64,
    pub step: u64,
    pub max_works: usize,
    pub algorithm: MaxFlowAlgorithm,
    pub parallel: bool,
    pub trial_budget: Option<usize>,
}

impl Default for SatisfactionConfig {
    fn default() -> Self {
        Self {
            target: None,
            cap_ceiling: 25,
            step: 5,
            max_works: 5,
            algorithm: MaxFlowAlgorithm::default(),
            parallel: true,
            trial_budget: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Satisfaction {
    pub links: Vec<Link>,
    pub work_items: Vec<WorkItem>,
    pub target: u64,
    pub baseline_flow: u64,
    pub achieved_flow: u64,
    pub trials: usize,
    pub budget_exhausted: bool,
}

impl Satisfaction {
    pub fn is_satisfied(&self) -> bool {
        self.achieved_flow >= self.target
    }

    pub fn shortfall(&self) -> u64 {
        self.target.saturating_sub(self.achieved_flow)
    }
}

/// Capacities probed on a link currently at `current`: multiples of `step`
/// up to `ceiling`, then `ceiling` itself, keeping only real increases.
pub fn probe_capacities(current: u64, step: u64, ceiling: u64) -> Vec<u64> {
    let mut capacities: Vec<u64> = if step == 0 {
        Vec::new()
    } else {
        (1..=ceiling / step).map(|k| k * step).collect()
    };
    capacities.push(ceiling);
    capacities.dedup();
    capacities.retain(|&c| c > current);
    capacities
}

/// Upgrades links one at a time until the target flow is reached.
///
/// Every round probes each candidate of the pool and accepts the best
/// improving trial. A link stays in the pool after an upgrade and may be
/// raised again in a later round. Running out of candidates, rounds or
/// budget is not an error; compare `achieved_flow` with `target`.
pub fn satisfy(
    network: &Network,
    pool: &CandidatePool,
    config: &SatisfactionConfig,
) -> Result<Satisfaction> {
    let fixed = match pool {
        CandidatePool::Fixed(keys) => {
            for key in keys {
                network.check_key(key)?;
            }
            Some(probe::distinct(keys))
        }
        CandidatePool::Saturated => None,
    };

    let prober = Prober::new(network, config.algorithm, config.parallel);
    let mut links = network.links().to_vec();
    let mut live = prober.result(&links)?;
    let target = config.target.unwrap_or_else(|| network.total_demand());
    let baseline_flow = live.total_flow();
    let mut budget = TrialBudget::new(config.trial_budget);
    let mut work_items = Vec::new();
    let mut budget_exhausted = false;

    info!("satisfaction target {target}, baseline flow {baseline_flow}");

    while work_items.len() < config.max_works && live.total_flow() < target {
        let candidates = match &fixed {
            Some(keys) => keys.clone(),
            None => saturated_links(&links, &live)
                .iter()
                .map(|s| s.key())
                .collect(),
        };
        trace!("round {} candidates: {candidates:?}", work_items.len() + 1);

        let mut trials = probe::plan(&links, &candidates, |current| {
            probe_capacities(current, config.step, config.cap_ceiling)
        });
        if trials.is_empty() {
            debug!("no candidate can be raised below {}", config.cap_ceiling);
            break;
        }
        let granted = budget.grant(trials.len());
        if granted < trials.len() {
            trials.truncate(granted);
            budget_exhausted = true;
        }

        match prober.sweep(&links, &candidates, &trials)? {
            Some(best) if best.flow > live.total_flow() => {
                let key = candidates[best.trial.candidate].clone();
                probe::set_capacity(&mut links, &key, best.trial.capacity);
                live = prober.result(&links)?;
                info!(
                    "{key} set to {} units, total flow {}",
                    best.trial.capacity,
                    live.total_flow()
                );
                work_items.push(WorkItem::new(key, best.trial.capacity, live.total_flow()));
            }
            _ => {
                debug!("no probe improves flow {}", live.total_flow());
                break;
            }
        }
        if budget_exhausted {
            info!("trial budget exhausted after {} trials", budget.spent());
            break;
        }
    }

    let achieved_flow = live.total_flow();
    if achieved_flow < target {
        info!("target {target} not reached, stopped at {achieved_flow}");
    }
    Ok(Satisfaction {
        links,
        work_items,
        target,
        baseline_flow,
        achieved_flow,
        trials: budget.spent(),
        budget_exhausted,
    })
}
