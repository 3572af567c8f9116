//! Workflow services for Relay
//!
//! This crate sits between the graph engine and whatever hosts the
//! editor. It owns workflow identity and metadata, the editing session
//! (the sole caller of the engine's validation and mutation surfaces),
//! and a file-backed workflow store with metadata listing and JSON
//! export. All operations are synchronous; a session is constructed when
//! a workflow is opened and discarded when another one is.

pub mod error;
pub mod ids;
pub mod session;
pub mod store;
pub mod workflow;

// Re-export key types
pub use error::{Result, ServiceError};
pub use session::WorkflowSession;
pub use store::WorkflowStore;
pub use workflow::{Workflow, WorkflowMetadata};
