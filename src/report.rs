use crate::analysis::saturation::saturated_links;
use crate::analysis::summary::summarize_cities;
use crate::error::Result;
use crate::graph::augmented::SUPER_SOURCE;
use crate::graph::link::Link;
use crate::optimize::work::{WorkItem, summarize};
use crate::simulation::engine::SimulationEngine;
use std::io::Write;

/// Plain-text flow report of the loaded network, followed by the optimizer
/// (when candidates are configured) and satisfaction runs, each started from
/// the loaded network.
pub fn write_report(out: &mut impl Write, engine: &mut SimulationEngine) -> Result<()> {
    write_flow(out, engine)?;

    if !engine.settings().candidates.is_empty() {
        let result = engine.optimize()?;
        writeln!(out)?;
        writeln!(
            out,
            "Optimization: flow {} -> {} in {} trials{}",
            result.baseline_flow,
            result.final_flow,
            result.trials,
            exhausted(result.budget_exhausted)
        )?;
        write_works(out, engine.baseline().links(), &result.work_items)?;
        engine.reset()?;
    }

    let result = engine.satisfy()?;
    writeln!(out)?;
    writeln!(
        out,
        "Satisfaction: target {}, flow {} -> {} in {} trials{}",
        result.target,
        result.baseline_flow,
        result.achieved_flow,
        result.trials,
        exhausted(result.budget_exhausted)
    )?;
    write_works(out, engine.baseline().links(), &result.work_items)?;
    if !result.is_satisfied() {
        writeln!(out, "  target missed by {}", result.shortfall())?;
    }
    Ok(())
}

fn exhausted(flag: bool) -> &'static str {
    if flag { " (trial budget exhausted)" } else { "" }
}

fn write_flow(out: &mut impl Write, engine: &SimulationEngine) -> Result<()> {
    let network = engine.network();
    let flow = engine.current_flow();

    writeln!(
        out,
        "Network: {} nodes, {} links, supply {}, demand {}",
        network.node_count(),
        network.links().len(),
        network.total_supply(),
        network.total_demand()
    )?;
    writeln!(out, "Total flow: {}", flow.total_flow())?;

    writeln!(out, "Sources:")?;
    for (key, delivered) in flow.flow_by_link() {
        if key.from == SUPER_SOURCE {
            writeln!(out, "  {:<10} {:>5}", key.to, delivered)?;
        }
    }

    writeln!(out, "Cities:")?;
    for city in summarize_cities(network, flow) {
        writeln!(
            out,
            "  {:<10} {:>5}/{:<5} {:>6.2} {:?}, short {}",
            city.name(),
            city.received(),
            city.demand(),
            city.ratio(),
            city.level(),
            city.shortfall()
        )?;
    }

    writeln!(out, "Saturated links:")?;
    for link in saturated_links(network.links(), flow) {
        writeln!(out, "  {:<16} {:>5}", link.key().to_string(), link.capacity)?;
    }

    let side: Vec<&str> = flow
        .source_side()
        .iter()
        .map(String::as_str)
        .filter(|name| *name != SUPER_SOURCE)
        .collect();
    writeln!(out, "Minimum cut (source side: {}):", side.join(", "))?;
    for link in flow.cut_links(network.links()) {
        writeln!(out, "  {:<16} {:>5}", link.key().to_string(), link.capacity())?;
    }
    Ok(())
}

fn write_works(out: &mut impl Write, initial: &[Link], items: &[WorkItem]) -> Result<()> {
    if items.is_empty() {
        writeln!(out, "  no upgrade improves the flow")?;
        return Ok(());
    }
    for item in items {
        writeln!(out, "  {item}")?;
    }
    writeln!(out, "  per link:")?;
    for work in summarize(initial, items) {
        let from = work
            .initial_capacity
            .map_or_else(|| "new".to_string(), |c| c.to_string());
        writeln!(
            out,
            "    {:<16} {:>4} -> {:<4} flow {}",
            work.link.to_string(),
            from,
            work.final_capacity,
            work.flow
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::link::LinkKey;
    use crate::scenario::basic::BasicScenario;
    use crate::scenario::scenario::Scenario;
    use crate::simulation::engine::EngineSettings;

    fn report(candidates: Vec<LinkKey>) -> String {
        let mut engine = SimulationEngine::new(
            BasicScenario.network().unwrap(),
            EngineSettings {
                candidates,
                ..EngineSettings::default()
            },
        )
        .unwrap();
        let mut out = Vec::new();
        write_report(&mut out, &mut engine).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let text = report(vec![]);
        assert!(text.contains("Network: 12 nodes, 16 links, supply 55, demand 50"));
        assert!(text.contains("Total flow: 37"));
        assert!(text.contains("Saturated links:"));
        assert!(text.contains("Minimum cut (source side:"));
        assert!(text.contains("Sources:"));
        assert!(text.contains("Satisfaction: target 50, flow 37 ->"));
        assert!(text.contains("target missed by 5"));
        assert!(!text.contains("Optimization:"));
    }

    #[test]
    fn test_report_with_candidates() {
        let text = report(BasicScenario.candidates());
        assert!(text.contains("Optimization: flow 37 ->"));
    }
}
