use crate::flow::result::FlowResult;
use crate::graph::link::{Link, LinkKey};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SaturatedLink {
    pub from: String,
    pub to: String,
    pub capacity: u64,
}

impl SaturatedLink {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.from.as_str(), self.to.as_str())
    }
}

/// Links carrying exactly their capacity. Zero-capacity links never count.
pub fn saturated_links(links: &[Link], flow: &FlowResult) -> Vec<SaturatedLink> {
    links
        .iter()
        .filter(|l| l.capacity() > 0 && flow.link_flow(l) == l.capacity())
        .map(|l| SaturatedLink {
            from: l.from().to_string(),
            to: l.to().to_string(),
            capacity: l.capacity(),
        })
        .collect()
}
