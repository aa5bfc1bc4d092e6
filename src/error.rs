use thiserror::Error;

use crate::graph::NodeId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Terminals are equal or not nodes of the graph.
    #[error("invalid terminals: s = {s}, t = {t} in a graph with {nodes} nodes")]
    InvalidTerminals { s: NodeId, t: NodeId, nodes: usize },

    #[error("invalid capacity {capacity} on edge {from} -> {to}")]
    InvalidCapacity {
        from: NodeId,
        to: NodeId,
        capacity: String,
    },

    /// The search trees are in a state the algorithm can never produce.
    #[error("internal invariant violated: {0}")]
    InternalInvariantViolation(String),
}

impl Error {
    pub(crate) fn invariant(msg: impl Into<String>) -> Self {
        Error::InternalInvariantViolation(msg.into())
    }
}
