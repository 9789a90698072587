//! Pruning depth-first walk shared by the per-node rules.
//!
//! A rule inspects one node at a time and answers with a [`NodeVisit`];
//! the walker folds those answers into findings and decides what to descend
//! into. The root is never inspected.

use enforcer_core::graph::{DependencyGraph, NodeId};

/// A rule's verdict on a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeVisit<T> {
    /// Do not descend into this node's children.
    pub prune: bool,
    pub finding: Option<T>,
}

impl<T> NodeVisit<T> {
    pub fn descend() -> Self {
        Self {
            prune: false,
            finding: None,
        }
    }

    pub fn prune() -> Self {
        Self {
            prune: true,
            finding: None,
        }
    }

    pub fn report(finding: T, prune: bool) -> Self {
        Self {
            prune,
            finding: Some(finding),
        }
    }
}

/// A finding together with the node it was raised on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Found<T> {
    pub node: NodeId,
    pub depth: usize,
    pub finding: T,
}

/// Visit every non-root node in pre-order, skipping pruned subtrees.
///
/// `inspect` receives the node and its depth (1 = direct dependency).
pub fn walk<T, F>(graph: &DependencyGraph, mut inspect: F) -> Vec<Found<T>>
where
    F: FnMut(NodeId, usize) -> NodeVisit<T>,
{
    let mut found = Vec::new();
    let mut stack: Vec<(NodeId, usize)> = graph
        .children(graph.root())
        .into_iter()
        .rev()
        .map(|child| (child, 1))
        .collect();

    while let Some((node, depth)) = stack.pop() {
        let visit = inspect(node, depth);
        if let Some(finding) = visit.finding {
            found.push(Found {
                node,
                depth,
                finding,
            });
        }
        if !visit.prune {
            for child in graph.children(node).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
    found
}
