//! Node kinds and their configuration payloads
//!
//! Every node in a workflow graph is one of a closed set of action or
//! control kinds. The kind and its kind-specific configuration travel
//! together as a tagged union, so adding a kind forces every match site
//! to handle it.

use serde::{Deserialize, Serialize};

/// The kind of a workflow node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// Entry point of the workflow. Only one per graph.
    Start,
    /// Conditional branching on a user-defined expression.
    Condition,
    /// Sends a message to a recipient.
    SendMessage,
    /// Follows a user account.
    FollowUser,
    /// Waits for a fixed duration before the next action.
    WaitTimer,
}

impl NodeKind {
    /// Every node kind, in palette order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Start,
        NodeKind::Condition,
        NodeKind::SendMessage,
        NodeKind::FollowUser,
        NodeKind::WaitTimer,
    ];

    /// The wire/tag name of this kind (matches the serialized `kind` field).
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::Condition => "condition",
            NodeKind::SendMessage => "sendMessage",
            NodeKind::FollowUser => "followUser",
            NodeKind::WaitTimer => "waitTimer",
        }
    }

    /// Human-readable display label for the palette.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Condition => "Condition",
            NodeKind::SendMessage => "Send Message",
            NodeKind::FollowUser => "Follow User",
            NodeKind::WaitTimer => "Wait Timer",
        }
    }
}

/// Kind-specific configuration for a node.
///
/// Serializes adjacently tagged as `{"kind": ..., "config": {...}}`;
/// flattened into [`GraphNode`](crate::types::GraphNode) this produces the
/// persisted node shape `{id, kind, position, config}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "config", rename_all = "camelCase")]
pub enum NodeConfig {
    /// Entry point. Carries only its display label.
    #[serde(rename_all = "camelCase")]
    Start { label: String },

    /// Branches on a user-defined condition expression.
    #[serde(rename_all = "camelCase")]
    Condition {
        label: String,
        condition: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        true_label: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        false_label: Option<String>,
    },

    /// Sends `message` to `recipient`.
    #[serde(rename_all = "camelCase")]
    SendMessage {
        label: String,
        message: String,
        recipient: String,
    },

    /// Follows the account named by `username`.
    #[serde(rename_all = "camelCase")]
    FollowUser { label: String, username: String },

    /// Waits `hours` and `minutes` before continuing.
    #[serde(rename_all = "camelCase")]
    WaitTimer {
        label: String,
        hours: u32,
        minutes: u32,
    },
}

impl NodeConfig {
    /// The kind this configuration belongs to.
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeConfig::Start { .. } => NodeKind::Start,
            NodeConfig::Condition { .. } => NodeKind::Condition,
            NodeConfig::SendMessage { .. } => NodeKind::SendMessage,
            NodeConfig::FollowUser { .. } => NodeKind::FollowUser,
            NodeConfig::WaitTimer { .. } => NodeKind::WaitTimer,
        }
    }

    /// The node's display label.
    pub fn label(&self) -> &str {
        match self {
            NodeConfig::Start { label }
            | NodeConfig::Condition { label, .. }
            | NodeConfig::SendMessage { label, .. }
            | NodeConfig::FollowUser { label, .. }
            | NodeConfig::WaitTimer { label, .. } => label,
        }
    }

    /// Default configuration for a freshly dropped node of `kind`.
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Start => NodeConfig::Start {
                label: kind.label().to_string(),
            },
            NodeKind::Condition => NodeConfig::Condition {
                label: kind.label().to_string(),
                condition: String::new(),
                true_label: None,
                false_label: None,
            },
            NodeKind::SendMessage => NodeConfig::SendMessage {
                label: kind.label().to_string(),
                message: String::new(),
                recipient: String::new(),
            },
            NodeKind::FollowUser => NodeConfig::FollowUser {
                label: kind.label().to_string(),
                username: String::new(),
            },
            NodeKind::WaitTimer => NodeConfig::WaitTimer {
                label: kind.label().to_string(),
                hours: 0,
                minutes: 0,
            },
        }
    }
}
