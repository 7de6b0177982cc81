use crate::cli::Args;
use crate::graph::link::LinkKey;
use crate::graph::network::Network;
use crate::optimize::optimizer::OptimizerConfig;
use crate::optimize::satisfaction::{CandidatePool, SatisfactionConfig};
use crate::persist::json;
use crate::scenario::basic::BasicScenario;
use crate::scenario::random::RandomScenario;
use crate::scenario::scenario::Scenario;
use crate::simulation::engine::{EngineSettings, SimulationEngine};
use crate::tui::app::App;
use crate::tui::draw::draw_app;
use anyhow::Context;
use clap::Parser;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use env_logger::{Env, Target};
use log::info;
use std::fs::File;
use std::time::Duration;

mod analysis;
mod cli;
mod error;
mod flow;
mod graph;
mod optimize;
mod persist;
mod report;
mod scenario;
mod simulation;
mod tui;

fn init_logging(args: &Args) -> anyhow::Result<()> {
    let env = Env::default().default_filter_or("info");
    if args.report {
        env_logger::Builder::from_env(env).init();
    } else if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot create log file {}", path.display()))?;
        env_logger::Builder::from_env(env)
            .target(Target::Pipe(Box::new(file)))
            .init();
    }
    Ok(())
}

fn load_network(args: &Args) -> anyhow::Result<(Network, Vec<LinkKey>)> {
    if let Some(path) = &args.network {
        let network = json::load(path)
            .with_context(|| format!("cannot load network from {}", path.display()))?;
        return Ok((network, Vec::new()));
    }
    let scenario: Box<dyn Scenario> = match args.random {
        Some(seed) => Box::new(RandomScenario::new(seed)),
        None => Box::new(BasicScenario),
    };
    let network = scenario
        .network()
        .with_context(|| format!("scenario {} is invalid", scenario.name()))?;
    Ok((network, scenario.candidates()))
}

fn settings(args: &Args, defaults: Vec<LinkKey>) -> EngineSettings {
    let pool = if args.optimize.is_empty() {
        CandidatePool::Saturated
    } else {
        CandidatePool::Fixed(args.optimize.clone())
    };
    let candidates = if args.optimize.is_empty() {
        defaults
    } else {
        args.optimize.clone()
    };
    EngineSettings {
        algorithm: args.algorithm,
        optimizer: OptimizerConfig {
            parallel: !args.sequential,
            trial_budget: args.trial_budget,
            ..OptimizerConfig::default()
        },
        satisfaction: SatisfactionConfig {
            target: args.target,
            cap_ceiling: args.cap_ceiling,
            step: args.step,
            max_works: args.max_works,
            parallel: !args.sequential,
            trial_budget: args.trial_budget,
            ..SatisfactionConfig::default()
        },
        candidates,
        pool,
        drought_seed: args.drought_seed,
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let (network, defaults) = load_network(&args)?;
    for key in &args.optimize {
        if network.link(key).is_none() {
            info!("{key} is not in the network, an upgrade will create it");
        }
    }
    if let Some(path) = &args.save {
        json::save(&network, path)
            .with_context(|| format!("cannot save network to {}", path.display()))?;
    }

    let mut engine = SimulationEngine::new(network, settings(&args, defaults))?;

    if args.report {
        report::write_report(&mut std::io::stdout().lock(), &mut engine)?;
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let mut app = App::new(engine);

    while app.running {
        terminal.draw(|frame| draw_app(frame, &app))?;

        if crossterm::event::poll(Duration::from_millis(16))? {
            match crossterm::event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') => app.running = false,
                    KeyCode::Char('o') => app.satisfy(),
                    KeyCode::Char('p') => app.optimize(),
                    KeyCode::Char('d') => app.drought(),
                    KeyCode::Char('r') => app.reset(),
                    _ => {}
                },
                _ => continue,
            }
        }
    }
    Ok(())
}
