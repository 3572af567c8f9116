//! Structural validation for workflow graphs
//!
//! Applies the domain rules — start-node cardinality, acyclicity,
//! connectivity, and per-node degree limits — and reports every failure
//! as a structured violation. A graph is valid iff the returned list is
//! empty.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::algorithms::{detect_cycle, find_disconnected};
use crate::nodes::NodeKind;
use crate::types::{GraphEdge, GraphNode};

/// Machine-readable tag for one class of structural violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    /// No node of kind start exists
    NoStartNode,
    /// More than one node of kind start exists
    MultipleStartNodes,
    /// The graph contains a directed cycle
    CycleDetected,
    /// At least one node touches no edge
    IsolatedNodes,
    /// An edge endpoint references a node that is not in the graph
    NodeNotFound,
    /// The start node has an incoming edge
    StartIncomingConnection,
    /// The start node's outgoing edge count differs from one
    StartOutgoingCount,
    /// A non-start node has more than one incoming edge
    InvalidIncomingCount,
    /// A non-start node has more than one outgoing edge
    MultipleOutgoing,
}

/// A structured report of one way a graph fails a structural rule
///
/// `source_id`/`target_id` are empty strings when the violation is
/// graph-global rather than tied to a specific node or edge. `is_valid`
/// is always false on emitted violations; a valid graph is simply the
/// absence of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub source_id: String,
    pub target_id: String,
    pub is_valid: bool,
    /// Human-readable message
    pub error: String,
    /// Machine-readable code
    pub code: ViolationCode,
}

impl Violation {
    /// A graph-global violation with no specific node or edge
    fn global(code: ViolationCode, error: impl Into<String>) -> Self {
        Self {
            source_id: String::new(),
            target_id: String::new(),
            is_valid: false,
            error: error.into(),
            code,
        }
    }

    /// A violation tied to a specific node
    fn node(node_id: impl Into<String>, code: ViolationCode, error: impl Into<String>) -> Self {
        Self {
            source_id: node_id.into(),
            target_id: String::new(),
            is_valid: false,
            error: error.into(),
            code,
        }
    }

    /// A violation tied to a specific edge
    fn edge(
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        code: ViolationCode,
        error: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            is_valid: false,
            error: error.into(),
            code,
        }
    }
}

/// Validate a graph snapshot against every structural rule.
///
/// Pure and deterministic: identical input yields the identical violation
/// sequence. Emission order is fixed — start-node cardinality, cycle
/// check, isolated-node check, dangling-edge checks in edge order, then
/// per-node degree checks in node order.
pub fn validate(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<Violation> {
    let mut violations = Vec::new();

    check_start_cardinality(nodes, &mut violations);
    check_acyclic(edges, &mut violations);
    check_connectivity(nodes, edges, &mut violations);
    check_edge_references(nodes, edges, &mut violations);
    check_degrees(nodes, edges, &mut violations);

    violations
}

/// Exactly one start node must exist
fn check_start_cardinality(nodes: &[GraphNode], violations: &mut Vec<Violation>) {
    let start_count = nodes.iter().filter(|n| n.kind() == NodeKind::Start).count();

    if start_count == 0 {
        violations.push(Violation::global(
            ViolationCode::NoStartNode,
            "Workflow must have exactly one start node",
        ));
    } else if start_count > 1 {
        violations.push(Violation::global(
            ViolationCode::MultipleStartNodes,
            "Workflow can only have one start node",
        ));
    }
}

/// The graph must contain no directed cycle
fn check_acyclic(edges: &[GraphEdge], violations: &mut Vec<Violation>) {
    if detect_cycle(edges) {
        violations.push(Violation::global(
            ViolationCode::CycleDetected,
            "Workflow cannot contain cycles or loops",
        ));
    }
}

/// Every node must touch at least one edge
///
/// One aggregate violation regardless of how many nodes are isolated.
fn check_connectivity(nodes: &[GraphNode], edges: &[GraphEdge], violations: &mut Vec<Violation>) {
    if !find_disconnected(nodes, edges).is_empty() {
        violations.push(Violation::global(
            ViolationCode::IsolatedNodes,
            "Workflow cannot have isolated nodes",
        ));
    }
}

/// Every edge endpoint must resolve to a node in the graph
fn check_edge_references(
    nodes: &[GraphNode],
    edges: &[GraphEdge],
    violations: &mut Vec<Violation>,
) {
    let node_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

    for edge in edges {
        if !node_ids.contains(edge.source.as_str()) || !node_ids.contains(edge.target.as_str()) {
            violations.push(Violation::edge(
                &edge.source,
                &edge.target,
                ViolationCode::NodeNotFound,
                "Source or target node not found",
            ));
        }
    }
}

/// Per-node degree rules
///
/// The start node takes no incoming edges and exactly one outgoing edge;
/// the two checks are independent and may both fire. Non-start nodes are
/// held to at most one incoming and one outgoing edge. The rewiring rule
/// already keeps interactively edited graphs inside that bound, but
/// graphs built out-of-band (programmatic import, tests) bypass it, so
/// the rule is enforced here as well.
fn check_degrees(nodes: &[GraphNode], edges: &[GraphEdge], violations: &mut Vec<Violation>) {
    let mut incoming: HashMap<&str, usize> = HashMap::new();
    let mut outgoing: HashMap<&str, usize> = HashMap::new();
    for edge in edges {
        *incoming.entry(edge.target.as_str()).or_insert(0) += 1;
        *outgoing.entry(edge.source.as_str()).or_insert(0) += 1;
    }

    for node in nodes {
        let incoming_count = incoming.get(node.id.as_str()).copied().unwrap_or(0);
        let outgoing_count = outgoing.get(node.id.as_str()).copied().unwrap_or(0);

        if node.kind() == NodeKind::Start {
            if incoming_count != 0 {
                violations.push(Violation::node(
                    &node.id,
                    ViolationCode::StartIncomingConnection,
                    "Start node cannot have incoming connections",
                ));
            }
            if outgoing_count != 1 {
                violations.push(Violation::node(
                    &node.id,
                    ViolationCode::StartOutgoingCount,
                    "Start node must have exactly one outgoing connection",
                ));
            }
        } else {
            if incoming_count > 1 {
                violations.push(Violation::node(
                    &node.id,
                    ViolationCode::InvalidIncomingCount,
                    "Node cannot have more than one incoming connection",
                ));
            }
            if outgoing_count > 1 {
                violations.push(Violation::node(
                    &node.id,
                    ViolationCode::MultipleOutgoing,
                    "Node cannot have more than one outgoing connection",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::NodeConfig;
    use crate::types::Position;

    fn node(id: &str, kind: NodeKind) -> GraphNode {
        GraphNode::new(id, Position::default(), NodeConfig::default_for(kind))
    }

    fn edge(id: &str, source: &str, target: &str) -> GraphEdge {
        GraphEdge::new(id, source, target)
    }

    fn codes(violations: &[Violation]) -> Vec<ViolationCode> {
        violations.iter().map(|v| v.code).collect()
    }

    #[test]
    fn test_valid_linear_workflow() {
        // Scenario: start -> sendMessage -> waitTimer
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
        ];
        let edges = vec![edge("e1", "start", "node1"), edge("e2", "node1", "node2")];

        let violations = validate(&nodes, &edges);
        assert!(violations.is_empty(), "expected no violations, got {:?}", violations);
    }

    #[test]
    fn test_no_start_node() {
        let nodes = vec![
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
        ];
        let edges = vec![edge("e1", "node1", "node2")];

        let violations = validate(&nodes, &edges);
        assert_eq!(codes(&violations), vec![ViolationCode::NoStartNode]);
        assert_eq!(
            violations[0].error,
            "Workflow must have exactly one start node"
        );
    }

    #[test]
    fn test_multiple_start_nodes() {
        let nodes = vec![node("start1", NodeKind::Start), node("start2", NodeKind::Start)];

        let violations = validate(&nodes, &[]);
        // Both starts are also isolated and missing their outgoing edge.
        assert_eq!(
            codes(&violations),
            vec![
                ViolationCode::MultipleStartNodes,
                ViolationCode::IsolatedNodes,
                ViolationCode::StartOutgoingCount,
                ViolationCode::StartOutgoingCount,
            ]
        );
    }

    #[test]
    fn test_start_cardinality_codes_mutually_exclusive() {
        let none = validate(&[node("a", NodeKind::SendMessage)], &[]);
        assert!(none.iter().any(|v| v.code == ViolationCode::NoStartNode));
        assert!(!none.iter().any(|v| v.code == ViolationCode::MultipleStartNodes));

        let two = validate(
            &[node("s1", NodeKind::Start), node("s2", NodeKind::Start)],
            &[],
        );
        assert!(two.iter().any(|v| v.code == ViolationCode::MultipleStartNodes));
        assert!(!two.iter().any(|v| v.code == ViolationCode::NoStartNode));
    }

    #[test]
    fn test_cycle_feeding_start_reports_exactly_three() {
        // A cycle between two action nodes plus an unreciprocated feeder
        // into start: the start node gains an incoming edge and has no
        // outgoing edge, so exactly three violations fire.
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
            node("node3", NodeKind::FollowUser),
        ];
        let edges = vec![
            edge("e1", "node1", "node2"),
            edge("e2", "node2", "node1"),
            edge("e3", "node3", "start"),
        ];

        let violations = validate(&nodes, &edges);
        assert_eq!(
            codes(&violations),
            vec![
                ViolationCode::CycleDetected,
                ViolationCode::StartIncomingConnection,
                ViolationCode::StartOutgoingCount,
            ]
        );
    }

    #[test]
    fn test_isolated_node_is_single_aggregate_violation() {
        // Scenario: start -> node1, with node2 untouched by any edge.
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
        ];
        let edges = vec![edge("e1", "start", "node1")];

        let violations = validate(&nodes, &edges);
        assert_eq!(codes(&violations), vec![ViolationCode::IsolatedNodes]);
        assert_eq!(violations[0].error, "Workflow cannot have isolated nodes");
    }

    #[test]
    fn test_two_isolated_nodes_still_one_violation() {
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("a", NodeKind::WaitTimer),
            node("b", NodeKind::FollowUser),
        ];
        let edges = vec![edge("e1", "start", "node1")];

        let violations = validate(&nodes, &edges);
        let isolated: Vec<_> = violations
            .iter()
            .filter(|v| v.code == ViolationCode::IsolatedNodes)
            .collect();
        assert_eq!(isolated.len(), 1);
    }

    #[test]
    fn test_dangling_edge_reported_per_edge() {
        let nodes = vec![node("start", NodeKind::Start), node("node1", NodeKind::SendMessage)];
        let edges = vec![
            edge("e1", "start", "node1"),
            edge("e2", "node1", "ghost"),
            edge("e3", "phantom", "node1"),
        ];

        let violations = validate(&nodes, &edges);
        let dangling: Vec<_> = violations
            .iter()
            .filter(|v| v.code == ViolationCode::NodeNotFound)
            .collect();
        assert_eq!(dangling.len(), 2);
        assert_eq!(dangling[0].source_id, "node1");
        assert_eq!(dangling[0].target_id, "ghost");
        assert_eq!(dangling[1].source_id, "phantom");
        assert_eq!(dangling[1].error, "Source or target node not found");
    }

    #[test]
    fn test_start_degree_checks_fire_independently() {
        // start has one incoming edge and one outgoing edge: only the
        // incoming check fires.
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
        ];
        let edges = vec![
            edge("e1", "start", "node1"),
            edge("e2", "node2", "start"),
            edge("e3", "node1", "node2"),
        ];

        let violations = validate(&nodes, &edges);
        assert_eq!(
            codes(&violations),
            vec![
                ViolationCode::CycleDetected,
                ViolationCode::StartIncomingConnection,
            ]
        );
    }

    #[test]
    fn test_non_start_multiple_outgoing() {
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
            node("node3", NodeKind::Condition),
        ];
        let edges = vec![
            edge("e1", "start", "node1"),
            edge("e2", "node1", "node2"),
            edge("e3", "node1", "node3"),
        ];

        let violations = validate(&nodes, &edges);
        assert_eq!(codes(&violations), vec![ViolationCode::MultipleOutgoing]);
        assert_eq!(violations[0].source_id, "node1");
    }

    #[test]
    fn test_non_start_multiple_incoming() {
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("node2", NodeKind::WaitTimer),
        ];
        let edges = vec![
            edge("e1", "start", "node2"),
            edge("e2", "node1", "node2"),
            edge("e3", "node2", "node1"),
        ];

        let violations = validate(&nodes, &edges);
        assert!(violations
            .iter()
            .any(|v| v.code == ViolationCode::InvalidIncomingCount && v.source_id == "node2"));
    }

    #[test]
    fn test_empty_graph() {
        let violations = validate(&[], &[]);
        assert_eq!(codes(&violations), vec![ViolationCode::NoStartNode]);
    }

    #[test]
    fn test_validate_is_deterministic_and_idempotent() {
        let nodes = vec![
            node("start", NodeKind::Start),
            node("node1", NodeKind::SendMessage),
            node("lonely", NodeKind::WaitTimer),
        ];
        let edges = vec![
            edge("e1", "start", "node1"),
            edge("e2", "node1", "start"),
            edge("e3", "node1", "ghost"),
        ];

        let first = validate(&nodes, &edges);
        let second = validate(&nodes, &edges);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_violation_wire_shape() {
        let violations = validate(&[], &[]);
        let json = serde_json::to_value(&violations[0]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sourceId": "",
                "targetId": "",
                "isValid": false,
                "error": "Workflow must have exactly one start node",
                "code": "NO_START_NODE"
            })
        );
    }

    #[test]
    fn test_violation_code_names_are_stable() {
        let cases = [
            (ViolationCode::NoStartNode, "NO_START_NODE"),
            (ViolationCode::MultipleStartNodes, "MULTIPLE_START_NODES"),
            (ViolationCode::CycleDetected, "CYCLE_DETECTED"),
            (ViolationCode::IsolatedNodes, "ISOLATED_NODES"),
            (ViolationCode::NodeNotFound, "NODE_NOT_FOUND"),
            (
                ViolationCode::StartIncomingConnection,
                "START_INCOMING_CONNECTION",
            ),
            (ViolationCode::StartOutgoingCount, "START_OUTGOING_COUNT"),
            (ViolationCode::InvalidIncomingCount, "INVALID_INCOMING_COUNT"),
            (ViolationCode::MultipleOutgoing, "MULTIPLE_OUTGOING"),
        ];
        for (code, name) in cases {
            assert_eq!(serde_json::to_value(code).unwrap(), serde_json::json!(name));
        }
    }
}
