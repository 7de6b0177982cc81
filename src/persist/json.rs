use crate::error::Result;
use crate::graph::link::Link;
use crate::graph::network::Network;
use crate::graph::node::Node;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk shape of a network definition.
#[derive(Serialize, Deserialize)]
struct NetworkFile {
    nodes: Vec<Node>,
    links: Vec<Link>,
}

#[derive(Serialize)]
struct NetworkFileRef<'a> {
    nodes: &'a [Node],
    links: &'a [Link],
}

/// Parses and validates a network definition.
pub fn from_json(text: &str) -> Result<Network> {
    let file: NetworkFile = serde_json::from_str(text)?;
    Ok(Network::new(file.nodes, file.links)?)
}

pub fn to_json(network: &Network) -> Result<String> {
    let file = NetworkFileRef {
        nodes: network.nodes(),
        links: network.links(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

pub fn load(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let network = from_json(&fs::read_to_string(path)?)?;
    info!(
        "loaded {} nodes and {} links from {}",
        network.node_count(),
        network.links().len(),
        path.display()
    );
    Ok(network)
}

pub fn save(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, to_json(network)?)?;
    info!("saved network to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationError};
    use crate::flow;
    use crate::scenario::basic::BasicScenario;
    use crate::scenario::scenario::Scenario;
    use tempfile::tempdir;

    const SMALL: &str = r#"{
        "nodes": [
            {"name": "S1", "kind": "source", "capacity": 10},
            {"name": "J", "kind": "intermediate"},
            {"name": "V1", "kind": "city", "capacity": 15}
        ],
        "links": [
            {"from": "S1", "to": "J", "capacity": 8},
            {"from": "J", "to": "V1", "capacity": 12}
        ]
    }"#;

    #[test]
    fn test_parse_definition() {
        let network = from_json(SMALL).unwrap();
        assert_eq!(3, network.node_count());
        assert_eq!(Some(10), network.node_by_name("S1").unwrap().kind().capacity());
        assert!(network.node_by_name("J").unwrap().kind().capacity().is_none());
        assert_eq!(15, network.total_demand());
        assert_eq!(8, flow::solve(&network.augment()).unwrap().total_flow());
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("demo.json");
        let network = BasicScenario.network().unwrap();

        save(&network, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(network.nodes(), loaded.nodes());
        assert_eq!(network.links(), loaded.links());
    }

    #[test]
    fn test_junction_written_without_capacity() {
        let text = to_json(&from_json(SMALL).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let junction = &value["nodes"][1];
        assert_eq!("intermediate", junction["kind"]);
        assert!(junction.get("capacity").is_none());
    }

    #[test]
    fn test_invalid_definitions_rejected() {
        let unknown = SMALL.replace(r#""to": "V1""#, r#""to": "V9""#);
        assert!(matches!(
            from_json(&unknown),
            Err(Error::Validation(ValidationError::UnknownEndpoint { .. }))
        ));

        let negative = SMALL.replace(r#""capacity": 8"#, r#""capacity": -8"#);
        assert!(matches!(from_json(&negative), Err(Error::Json(_))));

        let bad_kind = SMALL.replace("intermediate", "reservoir");
        assert!(matches!(from_json(&bad_kind), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            load(dir.path().join("absent.json")),
            Err(Error::Io(_))
        ));
    }
}
