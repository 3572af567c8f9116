//! Pure graph algorithms over node and edge collections
//!
//! These functions know nothing about node kinds or validation rules;
//! they operate on ids only. `detect_cycle` and `topological_order` work
//! on the node set implied by edge endpoints, so nodes without edges are
//! invisible to them — connectivity is checked separately by
//! [`find_disconnected`].

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::{GraphEdge, GraphNode, NodeId};

/// Check whether the edge set contains a directed cycle.
///
/// Depth-first traversal with an explicit recursion-stack set: revisiting
/// a node already on the stack is a back edge, and a node fully explored
/// without reaching its own ancestors is never explored again. O(V+E).
pub fn detect_cycle(edges: &[GraphEdge]) -> bool {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in edges {
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    fn visit<'a>(
        node: &'a str,
        adjacency: &HashMap<&'a str, Vec<&'a str>>,
        visited: &mut HashSet<&'a str>,
        on_stack: &mut HashSet<&'a str>,
    ) -> bool {
        if on_stack.contains(node) {
            return true;
        }
        if visited.contains(node) {
            return false;
        }

        visited.insert(node);
        on_stack.insert(node);

        if let Some(neighbors) = adjacency.get(node) {
            for &next in neighbors {
                if visit(next, adjacency, visited, on_stack) {
                    return true;
                }
            }
        }

        on_stack.remove(node);
        false
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut on_stack: HashSet<&str> = HashSet::new();

    adjacency
        .keys()
        .any(|&node| visit(node, &adjacency, &mut visited, &mut on_stack))
}

/// Find every node that appears in no edge, as source or target.
///
/// Order-preserving over the input `nodes`.
pub fn find_disconnected(nodes: &[GraphNode], edges: &[GraphEdge]) -> Vec<NodeId> {
    let mut connected: HashSet<&str> = HashSet::new();
    for edge in edges {
        connected.insert(edge.source.as_str());
        connected.insert(edge.target.as_str());
    }

    nodes
        .iter()
        .filter(|n| !connected.contains(n.id.as_str()))
        .map(|n| n.id.clone())
        .collect()
}

/// Topological ordering of the edge-implied node set (Kahn's algorithm).
///
/// Returns the empty sequence when the graph contains a cycle, i.e. when
/// no complete ordering exists. Nodes are discovered in edge order, so the
/// result is deterministic for a given edge list.
pub fn topological_order(edges: &[GraphEdge]) -> Vec<NodeId> {
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut discovered: Vec<&str> = Vec::new();

    for edge in edges {
        for id in [edge.source.as_str(), edge.target.as_str()] {
            if !in_degree.contains_key(id) {
                in_degree.insert(id, 0);
                discovered.push(id);
            }
        }
        adjacency
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        *in_degree.entry(edge.target.as_str()).or_insert(0) += 1;
    }

    let mut queue: VecDeque<&str> = discovered
        .iter()
        .copied()
        .filter(|id| in_degree.get(id).copied().unwrap_or(0) == 0)
        .collect();

    let mut order: Vec<NodeId> = Vec::new();
    while let Some(node) = queue.pop_front() {
        order.push(node.to_string());

        if let Some(neighbors) = adjacency.get(node) {
            for &next in neighbors {
                if let Some(deg) = in_degree.get_mut(next) {
                    *deg -= 1;
                    if *deg == 0 {
                        queue.push_back(next);
                    }
                }
            }
        }
    }

    if order.len() == discovered.len() {
        order
    } else {
        Vec::new()
    }
}
