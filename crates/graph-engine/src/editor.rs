//! Mutation and history engine
//!
//! [`GraphEditor`] owns the live graph snapshot for the workflow being
//! edited and maintains undo/redo history as full snapshot copies on two
//! stacks. Content changes push the pre-change snapshot onto the past
//! stack and clear the redo stack; pure position drags mutate in place
//! without touching history, so dragging a node across the canvas does
//! not flood the undo stack with intermediate frames.
//!
//! # Design Choice: Snapshots vs Command Pattern
//!
//! Snapshots are used instead of the command pattern: no inverse
//! operation needs to be written per change, and any mutation — including
//! the edge eviction done by rewiring — undoes correctly for free.

use crate::error::{GraphEngineError, Result};
use crate::nodes::NodeConfig;
use crate::rewire;
use crate::types::{EdgeId, GraphEdge, GraphNode, GraphSnapshot, NodeId, Position};

/// A structural edit to the node collection
#[derive(Debug, Clone)]
pub enum NodeChange {
    /// Append a node
    Add(GraphNode),
    /// Remove a node by id (edges are left in place; use
    /// [`GraphEditor::delete_node`] to remove a node and its edges
    /// atomically)
    Remove(NodeId),
    /// Replace a node's configuration; the new config must keep the
    /// node's kind
    UpdateConfig { id: NodeId, config: NodeConfig },
    /// Move a node on the canvas; never recorded in history
    Move { id: NodeId, position: Position },
}

/// A structural edit to the edge collection
#[derive(Debug, Clone)]
pub enum EdgeChange {
    /// Append an edge
    Add(GraphEdge),
    /// Remove an edge by id
    Remove(EdgeId),
    /// Replace an edge's display label
    SetLabel { id: EdgeId, label: Option<String> },
}

/// Owns the live snapshot and the undo/redo stacks for one editing session
#[derive(Debug, Default)]
pub struct GraphEditor {
    /// The live graph state
    current: GraphSnapshot,
    /// Undo frames, oldest first
    past: Vec<GraphSnapshot>,
    /// Redo frames, nearest undo last
    future: Vec<GraphSnapshot>,
}

impl GraphEditor {
    /// Create an editor over an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an editor over an existing snapshot (e.g. a loaded workflow)
    pub fn from_snapshot(snapshot: GraphSnapshot) -> Self {
        Self {
            current: snapshot,
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    /// The live snapshot
    pub fn snapshot(&self) -> &GraphSnapshot {
        &self.current
    }

    /// Whether an undo frame is available
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether a redo frame is available
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Record the pre-change state and invalidate the redo branch
    fn push_history(&mut self) {
        self.past.push(self.current.clone());
        self.future.clear();
    }

    /// Apply a node change.
    ///
    /// Content changes (add/remove/config) record history; `Move` does
    /// not. A config update that would change the node's kind, or that
    /// targets a missing node, is rejected with the graph untouched.
    pub fn apply_node_change(&mut self, change: NodeChange) -> Result<()> {
        match change {
            NodeChange::Add(node) => {
                self.push_history();
                self.current.nodes.push(node);
            }
            NodeChange::Remove(id) => {
                if self.current.contains_node(&id) {
                    self.push_history();
                    self.current.nodes.retain(|n| n.id != id);
                }
            }
            NodeChange::UpdateConfig { id, config } => {
                let index = self
                    .current
                    .nodes
                    .iter()
                    .position(|n| n.id == id)
                    .ok_or_else(|| GraphEngineError::NodeNotFound(id.clone()))?;
                if self.current.nodes[index].kind() != config.kind() {
                    return Err(GraphEngineError::KindMismatch { node_id: id });
                }
                self.push_history();
                self.current.nodes[index].config = config;
            }
            NodeChange::Move { id, position } => {
                if let Some(node) = self.current.find_node_mut(&id) {
                    node.position = position;
                }
            }
        }
        Ok(())
    }

    /// Apply an edge change. All edge changes are content changes.
    pub fn apply_edge_change(&mut self, change: EdgeChange) -> Result<()> {
        match change {
            EdgeChange::Add(edge) => {
                self.push_history();
                self.current.edges.push(edge);
            }
            EdgeChange::Remove(id) => {
                if self.current.edges.iter().any(|e| e.id == id) {
                    self.push_history();
                    self.current.edges.retain(|e| e.id != id);
                }
            }
            EdgeChange::SetLabel { id, label } => {
                let index = self
                    .current
                    .edges
                    .iter()
                    .position(|e| e.id == id)
                    .ok_or_else(|| GraphEngineError::EdgeNotFound(id.clone()))?;
                self.push_history();
                self.current.edges[index].label = label;
            }
        }
        Ok(())
    }

    /// Complete a connection gesture.
    ///
    /// Applies the rewiring rule to the live edge set and always records
    /// history — a connection is never a mere position change.
    pub fn connect(&mut self, new_edge: GraphEdge) {
        self.push_history();
        self.current.edges = rewire::connect(&self.current.edges, new_edge);
    }

    /// Delete a node and every edge touching it as one atomic change.
    ///
    /// Returns false (and records nothing) when the node does not exist.
    pub fn delete_node(&mut self, id: &str) -> bool {
        if !self.current.contains_node(id) {
            return false;
        }
        self.push_history();
        self.current.nodes.retain(|n| n.id != id);
        self.current
            .edges
            .retain(|e| e.source != id && e.target != id);
        log::debug!("Deleted node '{}' and its edges", id);
        true
    }

    /// Step back one history frame. No-op on an empty past stack.
    pub fn undo(&mut self) -> bool {
        match self.past.pop() {
            Some(frame) => {
                let undone = std::mem::replace(&mut self.current, frame);
                self.future.push(undone);
                true
            }
            None => false,
        }
    }

    /// Step forward one undone frame. No-op on an empty future stack.
    pub fn redo(&mut self) -> bool {
        match self.future.pop() {
            Some(frame) => {
                let redone = std::mem::replace(&mut self.current, frame);
                self.past.push(redone);
                true
            }
            None => false,
        }
    }
}
