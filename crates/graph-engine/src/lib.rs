//! Graph Engine - Workflow graph model and structural-validity core for Relay
//!
//! This crate owns the non-trivial logic of the workflow editor: the
//! graph data model, the structural validation engine, the connection
//! rewiring rule, and the snapshot-based mutation/history engine. It is
//! storage-agnostic — callers hand it raw node/edge collections and get
//! validation results or updated collections back.
//!
//! - `types` / `nodes`: graph snapshot, nodes, edges, and the closed set
//!   of node kinds with their configuration payloads
//! - `algorithms`: pure graph algorithms (cycle detection, disconnected
//!   nodes, topological ordering)
//! - `validation`: domain rules producing structured [`Violation`]s
//! - `rewire`: connect-time eviction of conflicting edges
//! - `editor`: the mutation engine with undo/redo history
//!
//! # Example
//!
//! ```
//! use graph_engine::{
//!     GraphEditor, GraphEdge, GraphNode, NodeChange, NodeConfig, NodeKind, Position, validate,
//! };
//!
//! let mut editor = GraphEditor::new();
//! editor.apply_node_change(NodeChange::Add(GraphNode::new(
//!     "start",
//!     Position::default(),
//!     NodeConfig::default_for(NodeKind::Start),
//! )))?;
//! editor.apply_node_change(NodeChange::Add(GraphNode::new(
//!     "msg",
//!     Position::new(200.0, 0.0),
//!     NodeConfig::default_for(NodeKind::SendMessage),
//! )))?;
//! editor.connect(GraphEdge::new("e1", "start", "msg"));
//!
//! let snapshot = editor.snapshot();
//! assert!(validate(&snapshot.nodes, &snapshot.edges).is_empty());
//! # Ok::<(), graph_engine::GraphEngineError>(())
//! ```

pub mod algorithms;
pub mod editor;
pub mod error;
pub mod nodes;
pub mod rewire;
pub mod types;
pub mod validation;

// Re-export key types
pub use editor::{EdgeChange, GraphEditor, NodeChange};
pub use error::{GraphEngineError, Result};
pub use nodes::{NodeConfig, NodeKind};
pub use rewire::connect;
pub use types::{EdgeId, GraphEdge, GraphNode, GraphSnapshot, NodeId, Position};
pub use validation::{validate, Violation, ViolationCode};
