use thiserror::Error;

/// Rejected network definitions. Raised at construction, never recovered internally.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate node name `{0}`")]
    DuplicateNode(String),

    #[error("link {from} -> {to} references unknown node `{missing}`")]
    UnknownEndpoint {
        from: String,
        to: String,
        missing: String,
    },

    #[error("link {0} -> {0} loops on itself")]
    SelfLoop(String),

    #[error("duplicate link {from} -> {to}")]
    DuplicateLink { from: String, to: String },

    #[error("node name `{0}` is reserved for the synthetic terminals")]
    ReservedName(String),

    #[error("unknown node `{0}`")]
    UnknownNode(String),

    #[error("node `{0}` is an intermediate junction and carries no capacity")]
    NoCapacity(String),

    #[error("node `{0}` is not a source")]
    NotASource(String),
}

/// Defects of the augmented graph itself. Valid networks never produce these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("augmented graph has no `{0}` terminal")]
    MissingTerminal(&'static str),

    #[error("vertex {vertex} out of range for a graph of {vertex_count} vertices")]
    VertexOutOfRange { vertex: usize, vertex_count: usize },

    #[error("source and sink are the same vertex ({0})")]
    SameTerminals(usize),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid network: {0}")]
    Validation(#[from] ValidationError),

    #[error("max-flow solver failure: {0}")]
    Solver(#[from] SolverError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed network definition: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
