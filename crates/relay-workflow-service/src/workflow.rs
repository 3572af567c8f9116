//! Workflow records and their listing projection
//!
//! A [`Workflow`] is the persisted form of a named automation graph. The
//! editor holds at most one full workflow at a time; everything else is
//! listed through the lightweight [`WorkflowMetadata`] projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use graph_engine::GraphSnapshot;

use crate::ids;

/// A named, persisted automation graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The graph: nodes and edges at the top level of the record
    #[serde(flatten)]
    pub graph: GraphSnapshot,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Create a new empty workflow with a generated id
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: ids::workflow_id(),
            name: name.into(),
            description,
            graph: GraphSnapshot::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The listing projection of this workflow
    pub fn metadata(&self) -> WorkflowMetadata {
        WorkflowMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            node_count: self.graph.nodes.len(),
            edge_count: self.graph.edges.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Lightweight workflow summary for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
