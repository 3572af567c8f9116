//! Error types for the graph engine

use thiserror::Error;

/// Result type alias using GraphEngineError
pub type Result<T> = std::result::Result<T, GraphEngineError>;

/// Errors that can occur in the graph engine
///
/// These only cover rejected mutations. Structural problems in a graph
/// (dangling edges, cycles, isolated nodes) are never errors; they are
/// reported as [`Violation`](crate::validation::Violation) values by the
/// validation engine.
#[derive(Debug, Error)]
pub enum GraphEngineError {
    /// A mutation referenced a node that is not in the graph
    #[error("Node '{0}' not found in graph")]
    NodeNotFound(String),

    /// A mutation referenced an edge that is not in the graph
    #[error("Edge '{0}' not found in graph")]
    EdgeNotFound(String),

    /// A config update would change the node's kind
    #[error("Config update for node '{node_id}' would change its kind")]
    KindMismatch { node_id: String },
}
