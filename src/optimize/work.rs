use crate::graph::link::{Link, LinkKey};
use serde::Serialize;
use std::fmt;

/// One accepted capacity change and the total flow right after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    pub link: LinkKey,
    pub capacity: u64,
    pub total_flow: u64,
}

impl WorkItem {
    pub fn new(link: LinkKey, capacity: u64, total_flow: u64) -> Self {
        Self {
            link,
            capacity,
            total_flow,
        }
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} set to {} units, total flow {}",
            self.link, self.capacity, self.total_flow
        )
    }
}

/// Net effect of a work sequence on one link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkWork {
    pub link: LinkKey,
    /// `None` when the work created the link.
    pub initial_capacity: Option<u64>,
    pub final_capacity: u64,
    /// Total flow after the last change to this link.
    pub flow: u64,
}

/// Collapses repeated upgrades of the same link, ordered by the flow reached.
pub fn summarize(initial: &[Link], items: &[WorkItem]) -> Vec<LinkWork> {
    let mut summary: Vec<LinkWork> = Vec::new();
    for item in items {
        match summary.iter_mut().find(|w| w.link == item.link) {
            Some(work) => {
                work.final_capacity = item.capacity;
                work.flow = item.total_flow;
            }
            None => summary.push(LinkWork {
                link: item.link.clone(),
                initial_capacity: initial
                    .iter()
                    .find(|l| l.connects(&item.link.from, &item.link.to))
                    .map(Link::capacity),
                final_capacity: item.capacity,
                flow: item.total_flow,
            }),
        }
    }
    summary.sort_by_key(|w| w.flow);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_merges_repeated_links() {
        let initial = vec![Link::new("A", "B", 5), Link::new("B", "C", 10)];
        let items = vec![
            WorkItem::new(LinkKey::new("A", "B"), 10, 8),
            WorkItem::new(LinkKey::new("B", "D"), 5, 12),
            WorkItem::new(LinkKey::new("A", "B"), 15, 15),
        ];
        let summary = summarize(&initial, &items);

        assert_eq!(2, summary.len());
        assert_eq!(LinkKey::new("B", "D"), summary[0].link);
        assert_eq!(None, summary[0].initial_capacity);
        assert_eq!(
            LinkWork {
                link: LinkKey::new("A", "B"),
                initial_capacity: Some(5),
                final_capacity: 15,
                flow: 15,
            },
            summary[1]
        );
    }

    #[test]
    fn test_display() {
        let item = WorkItem::new(LinkKey::new("A", "E"), 12, 40);
        assert_eq!("A -> E set to 12 units, total flow 40", item.to_string());
    }
}
