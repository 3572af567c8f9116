//! The workflow editing session
//!
//! A [`WorkflowSession`] ties the identity of the workflow currently
//! open to the live graph owned by the mutation engine. It is the sole
//! caller of validation and mutation: collaborators (canvas, panels)
//! call into it with raw nodes and edges and display whatever comes
//! back. One session exists per open workflow; opening another workflow
//! means constructing a new session.
//!
//! Every mutation autosaves through the store unconditionally — an
//! invalid mid-edit graph is still persisted — while the explicit
//! [`save`](WorkflowSession::save) is validation-gated and refuses to
//! certify an invalid graph.

use chrono::{DateTime, Utc};

use graph_engine::{
    validate, EdgeChange, GraphEditor, GraphEdge, GraphNode, GraphSnapshot, NodeChange,
    NodeConfig, NodeKind, Position, Violation,
};

use crate::error::{Result, ServiceError};
use crate::ids;
use crate::store::WorkflowStore;
use crate::workflow::Workflow;

/// The editing session for one open workflow
#[derive(Debug)]
pub struct WorkflowSession {
    id: String,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    editor: GraphEditor,
}

impl WorkflowSession {
    /// Create a session over a brand-new empty workflow and persist it.
    pub fn create(
        name: impl Into<String>,
        description: Option<String>,
        store: &mut WorkflowStore,
    ) -> Result<Self> {
        let workflow = Workflow::new(name, description);
        store.insert_workflow(workflow.clone())?;
        log::info!("Created workflow '{}' ({})", workflow.name, workflow.id);
        Ok(Self::open(workflow))
    }

    /// Open a session over an existing workflow record.
    pub fn open(workflow: Workflow) -> Self {
        log::info!("Opened workflow '{}' ({})", workflow.name, workflow.id);
        Self {
            id: workflow.id,
            name: workflow.name,
            description: workflow.description,
            created_at: workflow.created_at,
            updated_at: workflow.updated_at,
            editor: GraphEditor::from_snapshot(workflow.graph),
        }
    }

    /// The workflow id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The workflow name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The live snapshot
    pub fn snapshot(&self) -> &GraphSnapshot {
        self.editor.snapshot()
    }

    /// Whether an undo frame is available
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    /// Whether a redo frame is available
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Validate the live graph
    pub fn validate(&self) -> Vec<Violation> {
        let snapshot = self.editor.snapshot();
        validate(&snapshot.nodes, &snapshot.edges)
    }

    /// The current state as a persistable workflow record
    pub fn to_workflow(&self) -> Workflow {
        Workflow {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            graph: self.editor.snapshot().clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Add a node to the graph.
    ///
    /// A second start node is rejected before insertion, with no
    /// mutation — this guard is distinct from (and in addition to) the
    /// post-hoc validation rule.
    pub fn add_node(&mut self, node: GraphNode, store: &mut WorkflowStore) -> Result<()> {
        if node.kind() == NodeKind::Start && self.snapshot().find_start_node().is_some() {
            log::warn!("Rejected second start node in workflow '{}'", self.id);
            return Err(ServiceError::DuplicateStartNode);
        }

        self.editor.apply_node_change(NodeChange::Add(node))?;
        self.autosave(store)
    }

    /// Add a freshly dropped node of `kind` with its default
    /// configuration and a generated id. Returns the new node's id.
    pub fn add_node_of_kind(
        &mut self,
        kind: NodeKind,
        position: Position,
        store: &mut WorkflowStore,
    ) -> Result<String> {
        let id = ids::node_id(kind);
        let node = GraphNode::new(id.clone(), position, NodeConfig::default_for(kind));
        self.add_node(node, store)?;
        Ok(id)
    }

    /// Delete a node and every edge touching it.
    ///
    /// Returns false when no such node exists (nothing is persisted).
    pub fn delete_node(&mut self, node_id: &str, store: &mut WorkflowStore) -> Result<bool> {
        if !self.editor.delete_node(node_id) {
            return Ok(false);
        }
        self.autosave(store)?;
        Ok(true)
    }

    /// Replace a node's configuration (kind-preserving).
    pub fn update_node_config(
        &mut self,
        node_id: &str,
        config: NodeConfig,
        store: &mut WorkflowStore,
    ) -> Result<()> {
        self.editor.apply_node_change(NodeChange::UpdateConfig {
            id: node_id.to_string(),
            config,
        })?;
        self.autosave(store)
    }

    /// Move a node on the canvas. Not recorded in history, but still
    /// autosaved.
    pub fn move_node(
        &mut self,
        node_id: &str,
        position: Position,
        store: &mut WorkflowStore,
    ) -> Result<()> {
        self.editor.apply_node_change(NodeChange::Move {
            id: node_id.to_string(),
            position,
        })?;
        self.autosave(store)
    }

    /// Apply an edge change.
    pub fn apply_edge_change(
        &mut self,
        change: EdgeChange,
        store: &mut WorkflowStore,
    ) -> Result<()> {
        self.editor.apply_edge_change(change)?;
        self.autosave(store)
    }

    /// Complete a connection gesture, evicting conflicting edges.
    pub fn connect(&mut self, new_edge: GraphEdge, store: &mut WorkflowStore) -> Result<()> {
        self.editor.connect(new_edge);
        self.autosave(store)
    }

    /// Undo the last content change. Returns whether anything moved.
    pub fn undo(&mut self, store: &mut WorkflowStore) -> Result<bool> {
        if !self.editor.undo() {
            return Ok(false);
        }
        self.autosave(store)?;
        Ok(true)
    }

    /// Redo the last undone change. Returns whether anything moved.
    pub fn redo(&mut self, store: &mut WorkflowStore) -> Result<bool> {
        if !self.editor.redo() {
            return Ok(false);
        }
        self.autosave(store)?;
        Ok(true)
    }

    /// Explicitly save the workflow.
    ///
    /// The live graph is validated first; any violation aborts the save
    /// with the first violation's message and performs no persistence.
    /// The in-memory graph is never lost by a failed save.
    pub fn save(&mut self, store: &mut WorkflowStore) -> Result<()> {
        let violations = self.validate();
        if let Some(first) = violations.first() {
            log::warn!(
                "Save of workflow '{}' rejected: {} ({} violations)",
                self.id,
                first.error,
                violations.len()
            );
            return Err(ServiceError::ValidationFailed(first.error.clone()));
        }

        self.autosave(store)?;
        log::info!("Saved workflow '{}'", self.id);
        Ok(())
    }

    /// Persist the current state unconditionally.
    fn autosave(&mut self, store: &mut WorkflowStore) -> Result<()> {
        self.updated_at = Utc::now();
        store.insert_workflow(self.to_workflow())
    }
}
