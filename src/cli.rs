use crate::flow::MaxFlowAlgorithm;
use crate::graph::link::LinkKey;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Water supply network flow analysis", long_about = None)]
pub struct Args {
    /// JSON network definition; the built-in demonstration network when omitted
    #[arg(long, conflicts_with = "random")]
    pub network: Option<PathBuf>,

    /// Generate a layered random network from this seed
    #[arg(long, value_name = "SEED")]
    pub random: Option<u64>,

    /// Total flow the satisfaction run aims for; total city demand by default
    #[arg(long)]
    pub target: Option<u64>,

    /// Highest capacity the satisfaction run may give a link
    #[arg(long, default_value_t = 25)]
    pub cap_ceiling: u64,

    /// Upgrades allowed per satisfaction run
    #[arg(long, default_value_t = 5)]
    pub max_works: usize,

    /// Capacity increment probed by the satisfaction run
    #[arg(long, default_value_t = 5)]
    pub step: u64,

    /// Candidate link for the optimizer, repeatable
    #[arg(long = "optimize", value_name = "FROM:TO", value_parser = parse_link_key)]
    pub optimize: Vec<LinkKey>,

    #[arg(long, value_enum, default_value_t = MaxFlowAlgorithm::Dinic)]
    pub algorithm: MaxFlowAlgorithm,

    /// Evaluate trials on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Max-flow evaluations allowed per optimization run
    #[arg(long)]
    pub trial_budget: Option<usize>,

    #[arg(long, default_value_t = 0)]
    pub drought_seed: u64,

    /// Print a report to stdout instead of opening the dashboard
    #[arg(long)]
    pub report: bool,

    /// Write the loaded network to this JSON file
    #[arg(long, value_name = "JSON")]
    pub save: Option<PathBuf>,

    /// Dashboard log destination; logging is off in the dashboard without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

pub fn parse_link_key(value: &str) -> Result<LinkKey, String> {
    match value.split_once(':') {
        Some((from, to)) if !from.is_empty() && !to.is_empty() => Ok(LinkKey::new(from, to)),
        _ => Err(format!("expected FROM:TO, got `{value}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_key() {
        assert_eq!(Ok(LinkKey::new("A", "E")), parse_link_key("A:E"));
        assert!(parse_link_key("AE").is_err());
        assert!(parse_link_key(":E").is_err());
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from([
            "aquaflow",
            "--optimize",
            "A:E",
            "--optimize",
            "I:L",
            "--algorithm",
            "edmonds-karp",
            "--report",
        ])
        .unwrap();
        assert_eq!(
            vec![LinkKey::new("A", "E"), LinkKey::new("I", "L")],
            args.optimize
        );
        assert_eq!(MaxFlowAlgorithm::EdmondsKarp, args.algorithm);
        assert_eq!(25, args.cap_ceiling);
        assert!(args.report);
        assert!(!args.sequential);
    }

    #[test]
    fn test_network_and_random_conflict() {
        assert!(
            Args::try_parse_from(["aquaflow", "--network", "n.json", "--random", "3"]).is_err()
        );
    }
}
