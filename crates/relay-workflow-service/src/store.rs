//! Workflow storage with file persistence.
//!
//! This module provides persistent storage for workflows, keeping them
//! in memory for fast access with optional JSON file persistence (one
//! file per workflow) for durability across restarts. The graph engine
//! never sees this layer; it receives and returns plain snapshots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use graph_engine::{GraphEdge, GraphNode};

use crate::error::{Result, ServiceError};
use crate::workflow::{Workflow, WorkflowMetadata};

/// In-memory workflow store with optional file persistence.
///
/// # Example
///
/// ```ignore
/// use relay_workflow_service::WorkflowStore;
///
/// let mut store = WorkflowStore::with_persistence(".relay/workflows");
/// let count = store.load_from_disk()?;
/// log::info!("Loaded {} workflows", count);
/// ```
#[derive(Debug, Default)]
pub struct WorkflowStore {
    /// Stored workflows, keyed by ID.
    workflows: HashMap<String, Workflow>,
    /// Optional path for file persistence.
    persist_path: Option<PathBuf>,
}

/// The shape of an exported workflow download.
#[derive(Serialize)]
struct ExportPayload<'a> {
    name: &'a str,
    nodes: &'a [GraphNode],
    edges: &'a [GraphEdge],
}

impl WorkflowStore {
    /// Create a new in-memory store without persistence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that persists to the given directory.
    ///
    /// The directory will be created if it doesn't exist when saving.
    pub fn with_persistence(path: impl AsRef<Path>) -> Self {
        Self {
            workflows: HashMap::new(),
            persist_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// Load all workflows from the persistence directory.
    ///
    /// Unparseable files are logged and skipped. Returns the number of
    /// workflows loaded.
    pub fn load_from_disk(&mut self) -> Result<usize> {
        let Some(ref path) = self.persist_path else {
            return Ok(0);
        };

        if !path.exists() {
            return Ok(0);
        }

        let mut count = 0;
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let file_path = entry.path();

            if file_path.extension().is_some_and(|e| e == "json") {
                let content = std::fs::read_to_string(&file_path)?;
                match serde_json::from_str::<Workflow>(&content) {
                    Ok(workflow) => {
                        log::info!("Loaded workflow '{}' from {:?}", workflow.id, file_path);
                        self.workflows.insert(workflow.id.clone(), workflow);
                        count += 1;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse workflow from {:?}: {}", file_path, e);
                    }
                }
            }
        }
        Ok(count)
    }

    /// Save a workflow to disk (if persistence is enabled).
    fn save_to_disk(&self, workflow: &Workflow) -> Result<()> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };

        std::fs::create_dir_all(path)?;
        let file_path = path.join(format!("{}.json", &workflow.id));
        let content = serde_json::to_string_pretty(workflow)?;
        std::fs::write(&file_path, content)?;
        log::debug!("Saved workflow '{}' to {:?}", workflow.id, file_path);
        Ok(())
    }

    /// Delete a workflow from disk (if persistence is enabled).
    fn delete_from_disk(&self, id: &str) -> Result<()> {
        let Some(ref path) = self.persist_path else {
            return Ok(());
        };

        let file_path = path.join(format!("{}.json", id));
        if file_path.exists() {
            std::fs::remove_file(&file_path)?;
            log::debug!("Deleted workflow '{}' from {:?}", id, file_path);
        }
        Ok(())
    }

    /// Get a workflow by ID.
    pub fn get_workflow(&self, id: &str) -> Option<&Workflow> {
        self.workflows.get(id)
    }

    /// Insert or update a workflow.
    ///
    /// The workflow is automatically persisted to disk if persistence is
    /// enabled.
    pub fn insert_workflow(&mut self, workflow: Workflow) -> Result<()> {
        self.save_to_disk(&workflow)?;
        self.workflows.insert(workflow.id.clone(), workflow);
        Ok(())
    }

    /// Remove a workflow by ID.
    ///
    /// Returns the removed workflow if it existed.
    pub fn remove_workflow(&mut self, id: &str) -> Result<Option<Workflow>> {
        self.delete_from_disk(id)?;
        Ok(self.workflows.remove(id))
    }

    /// List all workflows as lightweight metadata.
    pub fn list_workflows(&self) -> Vec<WorkflowMetadata> {
        let mut list: Vec<WorkflowMetadata> =
            self.workflows.values().map(Workflow::metadata).collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        list
    }

    /// Get all workflow IDs.
    pub fn workflow_ids(&self) -> Vec<String> {
        self.workflows.keys().cloned().collect()
    }

    /// Check if a workflow exists.
    pub fn contains(&self, id: &str) -> bool {
        self.workflows.contains_key(id)
    }

    /// Render a workflow as a pretty-printed JSON download payload
    /// (`{name, nodes, edges}`).
    pub fn export_json(&self, id: &str) -> Result<String> {
        let workflow = self
            .workflows
            .get(id)
            .ok_or_else(|| ServiceError::WorkflowNotFound(id.to_string()))?;

        let payload = ExportPayload {
            name: &workflow.name,
            nodes: &workflow.graph.nodes,
            edges: &workflow.graph.edges,
        };
        Ok(serde_json::to_string_pretty(&payload)?)
    }

    /// Suggested download filename for an exported workflow: the name
    /// lowercased with non-alphanumeric runs replaced by underscores.
    pub fn export_file_name(name: &str) -> String {
        let sanitized: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
            .collect();
        format!("{}.json", sanitized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_engine::{NodeConfig, NodeKind, Position};
    use tempfile::TempDir;

    fn create_test_workflow(name: &str) -> Workflow {
        let mut workflow = Workflow::new(name, None);
        workflow.graph.nodes.push(GraphNode::new(
            "start",
            Position::default(),
            NodeConfig::default_for(NodeKind::Start),
        ));
        workflow.graph.nodes.push(GraphNode::new(
            "msg",
            Position::new(200.0, 0.0),
            NodeConfig::default_for(NodeKind::SendMessage),
        ));
        workflow
            .graph
            .edges
            .push(GraphEdge::new("e1", "start", "msg"));
        workflow
    }

    #[test]
    fn test_in_memory_store() {
        let mut store = WorkflowStore::new();

        let workflow = create_test_workflow("Test Workflow");
        let id = workflow.id.clone();
        store.insert_workflow(workflow).unwrap();

        assert!(store.get_workflow(&id).is_some());
        assert!(store.get_workflow("nonexistent").is_none());
        assert!(store.contains(&id));

        let list = store.list_workflows();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].node_count, 2);
        assert_eq!(list[0].edge_count, 1);

        let removed = store.remove_workflow(&id).unwrap();
        assert!(removed.is_some());
        assert!(store.get_workflow(&id).is_none());
    }

    #[test]
    fn test_persistent_store_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let persist_path = temp_dir.path().join("workflows");

        let id;
        {
            let mut store = WorkflowStore::with_persistence(&persist_path);
            let workflow = create_test_workflow("Persistent Test");
            id = workflow.id.clone();
            store.insert_workflow(workflow).unwrap();
        }

        {
            let mut store = WorkflowStore::with_persistence(&persist_path);
            let count = store.load_from_disk().unwrap();
            assert_eq!(count, 1);
            let loaded = store.get_workflow(&id).unwrap();
            assert_eq!(loaded.name, "Persistent Test");
            assert_eq!(loaded.graph.nodes.len(), 2);
        }
    }

    #[test]
    fn test_load_skips_unparseable_files() {
        let temp_dir = TempDir::new().unwrap();
        let persist_path = temp_dir.path().join("workflows");
        std::fs::create_dir_all(&persist_path).unwrap();
        std::fs::write(persist_path.join("broken.json"), "not json").unwrap();

        let mut store = WorkflowStore::with_persistence(&persist_path);
        assert_eq!(store.load_from_disk().unwrap(), 0);
    }

    #[test]
    fn test_remove_deletes_file() {
        let temp_dir = TempDir::new().unwrap();
        let persist_path = temp_dir.path().join("workflows");

        let mut store = WorkflowStore::with_persistence(&persist_path);
        let workflow = create_test_workflow("Short-lived");
        let id = workflow.id.clone();
        store.insert_workflow(workflow).unwrap();
        assert!(persist_path.join(format!("{}.json", id)).exists());

        store.remove_workflow(&id).unwrap();
        assert!(!persist_path.join(format!("{}.json", id)).exists());
    }

    #[test]
    fn test_export_json_shape() {
        let mut store = WorkflowStore::new();
        let workflow = create_test_workflow("My Flow");
        let id = workflow.id.clone();
        store.insert_workflow(workflow).unwrap();

        let exported = store.export_json(&id).unwrap();
        let value: serde_json::Value = serde_json::from_str(&exported).unwrap();
        assert_eq!(value["name"], "My Flow");
        assert_eq!(value["nodes"].as_array().unwrap().len(), 2);
        assert_eq!(value["edges"].as_array().unwrap().len(), 1);
        // Identity and timestamps stay out of the download payload.
        assert!(value.get("id").is_none());
        assert!(value.get("createdAt").is_none());

        assert!(matches!(
            store.export_json("missing"),
            Err(ServiceError::WorkflowNotFound(_))
        ));
    }

    #[test]
    fn test_export_file_name_sanitization() {
        assert_eq!(
            WorkflowStore::export_file_name("My Welcome Flow!"),
            "my_welcome_flow_.json"
        );
        assert_eq!(WorkflowStore::export_file_name("plain"), "plain.json");
    }
}
