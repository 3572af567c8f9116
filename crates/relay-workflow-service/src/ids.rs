//! Identifier generation for workflows, nodes, and edges

use graph_engine::NodeKind;
use uuid::Uuid;

/// Generate a workflow id (`wf_<uuid>`)
pub fn workflow_id() -> String {
    format!("wf_{}", Uuid::new_v4())
}

/// Generate a node id prefixed with its kind (`sendMessage_<uuid>`)
pub fn node_id(kind: NodeKind) -> String {
    format!("{}_{}", kind.as_str(), Uuid::new_v4())
}

/// Generate an edge id (`edge_<uuid>`)
pub fn edge_id() -> String {
    format!("edge_{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_carry_their_prefix() {
        assert!(workflow_id().starts_with("wf_"));
        assert!(node_id(NodeKind::SendMessage).starts_with("sendMessage_"));
        assert!(node_id(NodeKind::Start).starts_with("start_"));
        assert!(edge_id().starts_with("edge_"));
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(workflow_id(), workflow_id());
        assert_ne!(node_id(NodeKind::WaitTimer), node_id(NodeKind::WaitTimer));
    }
}
