use crate::error::Result;
use crate::simulation::engine::SimulationEngine;
use log::warn;

pub struct App {
    pub engine: SimulationEngine,
    pub running: bool,
    status: Option<String>,
}

impl App {
    pub fn new(engine: SimulationEngine) -> Self {
        Self {
            engine,
            running: true,
            status: None,
        }
    }

    /// Last failed action, shown in the header until the next one succeeds.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn run<T>(&mut self, action: impl FnOnce(&mut SimulationEngine) -> Result<T>) {
        self.status = match action(&mut self.engine) {
            Ok(_) => None,
            Err(err) => {
                warn!("{err}");
                Some(err.to_string())
            }
        };
    }

    pub fn satisfy(&mut self) {
        self.run(SimulationEngine::satisfy);
    }

    pub fn optimize(&mut self) {
        if self.engine.settings().candidates.is_empty() {
            self.status = Some("no --optimize candidates given".to_string());
            return;
        }
        self.run(SimulationEngine::optimize);
    }

    pub fn drought(&mut self) {
        self.run(SimulationEngine::drought);
    }

    pub fn reset(&mut self) {
        self.run(SimulationEngine::reset);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        ratatui::restore();
    }
}
