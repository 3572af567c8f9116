//! Core types for workflow graphs
//!
//! These types define the structure of workflow graphs: nodes, edges,
//! and the snapshot that bundles them. A snapshot is plain data — it
//! carries no identity or timestamps, which belong to the workflow
//! record in the service layer.

use serde::{Deserialize, Serialize};

use crate::nodes::{NodeConfig, NodeKind};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// Position on the canvas
///
/// Presentation-only; no structural rule ever reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A node instance in a workflow graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Unique instance ID
    pub id: NodeId,
    /// Position on canvas
    pub position: Position,
    /// Node kind plus kind-specific configuration
    #[serde(flatten)]
    pub config: NodeConfig,
}

impl GraphNode {
    /// Create a new node
    pub fn new(id: impl Into<String>, position: Position, config: NodeConfig) -> Self {
        Self {
            id: id.into(),
            position,
            config,
        }
    }

    /// The kind of this node
    pub fn kind(&self) -> NodeKind {
        self.config.kind()
    }
}

/// An edge connecting two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Optional display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GraphEdge {
    /// Create a new unlabeled edge
    pub fn new(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            label: None,
        }
    }

    /// Attach a display label to this edge
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A complete graph snapshot: the node and edge state at one point in time
///
/// Node order is insertion order and carries no semantic meaning. Edge
/// endpoints should reference existing node ids; when they do not, the
/// validation engine reports it rather than this type rejecting it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    /// Nodes in the graph
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    /// Edges connecting nodes
    #[serde(default)]
    pub edges: Vec<GraphEdge>,
}

impl GraphSnapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find a node by ID (mutable)
    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut GraphNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Check whether a node with the given ID exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Get edges coming into a node
    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Get edges going out of a node
    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.source == node_id)
    }

    /// Find the start node, if one exists
    pub fn find_start_node(&self) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.kind() == NodeKind::Start)
    }
}
