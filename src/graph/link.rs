use serde::{Deserialize, Serialize};
use std::fmt;

/// Directed pipe between two named nodes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    from: String,
    to: String,
    capacity: u64,
}

impl Link {
    pub fn new(from: impl Into<String>, to: impl Into<String>, capacity: u64) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            capacity,
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn connects(&self, from: &str, to: &str) -> bool {
        self.from == from && self.to == to
    }

    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.from.as_str(), self.to.as_str())
    }

    /// Same endpoints, new capacity. Links are replaced, never edited in place.
    pub fn with_capacity(&self, capacity: u64) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            capacity,
        }
    }
}

/// Ordered `(from, to)` pair identifying a link, present or prospective.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LinkKey {
    pub from: String,
    pub to: String,
}

impl LinkKey {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for LinkKey {
    fn from((from, to): (A, B)) -> Self {
        Self::new(from, to)
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
