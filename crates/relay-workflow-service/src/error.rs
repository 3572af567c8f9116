//! Error types for the workflow service

use thiserror::Error;

/// Result type alias using ServiceError
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Errors that can occur in the workflow service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An explicit save was rejected; carries the first violation's message
    #[error("{0}")]
    ValidationFailed(String),

    /// A second start node was rejected before insertion
    #[error("Workflow can only have one start node")]
    DuplicateStartNode,

    /// The requested workflow is not in the store
    #[error("Workflow '{0}' not found")]
    WorkflowNotFound(String),

    /// A rejected graph mutation
    #[error(transparent)]
    Engine(#[from] graph_engine::GraphEngineError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
