use crate::error::Result;
use crate::flow::result::FlowResult;
use crate::flow::{self, MaxFlowAlgorithm};
use crate::graph::link::LinkKey;
use crate::graph::network::Network;
use crate::optimize::optimizer::{Optimization, OptimizerConfig, optimize_links};
use crate::optimize::satisfaction::{CandidatePool, Satisfaction, SatisfactionConfig, satisfy};
use crate::optimize::work::WorkItem;
use crate::simulation::modifiers::Drought;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::mem;

/// Something the operator did to the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Optimized { works: usize, flow: u64 },
    Satisfied { works: usize, flow: u64, target: u64 },
    Drought { source: String, previous: u64 },
    Reset { flow: u64 },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Optimized { works, flow } => {
                write!(f, "optimizer: {works} upgrades, flow {flow}")
            }
            Event::Satisfied {
                works,
                flow,
                target,
            } => write!(f, "satisfaction: {works} upgrades, flow {flow}/{target}"),
            Event::Drought { source, previous } => {
                write!(f, "drought: {source} dried up (was {previous})")
            }
            Event::Reset { flow } => write!(f, "reset: flow {flow}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub algorithm: MaxFlowAlgorithm,
    pub optimizer: OptimizerConfig,
    pub satisfaction: SatisfactionConfig,
    /// Links handed to the optimizer.
    pub candidates: Vec<LinkKey>,
    pub pool: CandidatePool,
    pub drought_seed: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            algorithm: MaxFlowAlgorithm::default(),
            optimizer: OptimizerConfig::default(),
            satisfaction: SatisfactionConfig::default(),
            candidates: Vec::new(),
            pool: CandidatePool::Saturated,
            drought_seed: 0,
        }
    }
}

/// Interactive session over one network: what-if changes, upgrades and the
/// flow before and after each of them.
pub struct SimulationEngine {
    baseline: Network,
    network: Network,
    settings: EngineSettings,
    current: FlowResult,
    previous: Option<FlowResult>,
    work_log: Vec<WorkItem>,
    events: Vec<Event>,
    rng: StdRng,
}

impl SimulationEngine {
    pub fn new(network: Network, settings: EngineSettings) -> Result<Self> {
        let current = flow::solve_with(settings.algorithm, &network.augment())?;
        info!("initial flow {}", current.total_flow());
        Ok(Self {
            baseline: network.clone(),
            network,
            rng: StdRng::seed_from_u64(settings.drought_seed),
            settings,
            current,
            previous: None,
            work_log: Vec::new(),
            events: Vec::new(),
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn baseline(&self) -> &Network {
        &self.baseline
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn current_flow(&self) -> &FlowResult {
        &self.current
    }

    /// Flow before the last change; the current one when nothing changed yet.
    pub fn previous_flow(&self) -> &FlowResult {
        self.previous.as_ref().unwrap_or(&self.current)
    }

    pub fn work_log(&self) -> &[WorkItem] {
        &self.work_log
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn recompute(&mut self) -> Result<()> {
        let next = flow::solve_with(self.settings.algorithm, &self.network.augment())?;
        debug!("flow {} -> {}", self.current.total_flow(), next.total_flow());
        self.previous = Some(mem::replace(&mut self.current, next));
        Ok(())
    }

    pub fn optimize(&mut self) -> Result<Optimization> {
        let config = OptimizerConfig {
            algorithm: self.settings.algorithm,
            ..self.settings.optimizer.clone()
        };
        let result = optimize_links(&self.network, &self.settings.candidates, &config)?;
        self.network = self.network.with_links(result.links.clone())?;
        self.work_log.extend(result.work_items.iter().cloned());
        self.recompute()?;
        self.events.push(Event::Optimized {
            works: result.work_items.len(),
            flow: result.final_flow,
        });
        Ok(result)
    }

    pub fn satisfy(&mut self) -> Result<Satisfaction> {
        let config = SatisfactionConfig {
            algorithm: self.settings.algorithm,
            ..self.settings.satisfaction.clone()
        };
        let result = satisfy(&self.network, &self.settings.pool, &config)?;
        self.network = self.network.with_links(result.links.clone())?;
        self.work_log.extend(result.work_items.iter().cloned());
        self.recompute()?;
        self.events.push(Event::Satisfied {
            works: result.work_items.len(),
            flow: result.achieved_flow,
            target: result.target,
        });
        Ok(result)
    }

    /// Dries up a random source. `None` when the network has no sources.
    pub fn drought(&mut self) -> Result<Option<Drought>> {
        let Some(drought) = Drought::random(&self.network, &mut self.rng) else {
            return Ok(None);
        };
        self.apply_drought(&drought)?;
        Ok(Some(drought))
    }

    pub fn apply_drought(&mut self, drought: &Drought) -> Result<()> {
        let previous = drought.apply(&mut self.network)?;
        info!(
            "{} output {} -> {}",
            drought.source(),
            previous,
            drought.remaining()
        );
        self.recompute()?;
        self.events.push(Event::Drought {
            source: drought.source().to_string(),
            previous,
        });
        Ok(())
    }

    /// Back to the loaded network. The work log is cleared, the drought RNG is not.
    pub fn reset(&mut self) -> Result<()> {
        self.network = self.baseline.clone();
        self.work_log.clear();
        self.recompute()?;
        self.events.push(Event::Reset {
            flow: self.current.total_flow(),
        });
        Ok(())
    }
}
