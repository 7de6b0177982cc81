use crate::error::ValidationError;
use crate::graph::link::LinkKey;
use crate::graph::network::Network;

/// A ready-made network definition.
pub trait Scenario {
    fn name(&self) -> String;
    fn network(&self) -> Result<Network, ValidationError>;

    /// Links worth handing to the optimizer when the caller names none.
    fn candidates(&self) -> Vec<LinkKey> {
        Vec::new()
    }
}
