//! Connection rewiring rule
//!
//! When a new connection is proposed, existing edges that conflict with
//! it are evicted rather than the new connection being rejected. Applied
//! on every connect, this keeps every node at no more than one outgoing
//! and one incoming edge without the validation engine ever seeing the
//! conflict.

use crate::types::GraphEdge;

/// Insert `new_edge`, evicting any conflicting connections first.
///
/// Drops every existing edge that shares `new_edge`'s source and every
/// existing edge that shares its target — two independent filters,
/// applied unconditionally — then appends `new_edge`.
pub fn connect(edges: &[GraphEdge], new_edge: GraphEdge) -> Vec<GraphEdge> {
    let mut rewired: Vec<GraphEdge> = edges
        .iter()
        .filter(|e| e.source != new_edge.source)
        .filter(|e| e.target != new_edge.target)
        .cloned()
        .collect();
    rewired.push(new_edge);
    rewired
}
