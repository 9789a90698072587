//! Resolved dependency tree.
//!
//! Nodes live in a petgraph arena; edges point parent -> child and the
//! incoming edge doubles as the non-owning parent link. Every `add_child`
//! creates a fresh node, so the graph is always a rooted tree.

use std::fmt;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;

use crate::artifact::ArtifactCoordinate;

pub type NodeId = NodeIndex;

/// One occurrence of an artifact in the resolved tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub coordinate: ArtifactCoordinate,
    /// The version as requested before resolution: a plain version, a range
    /// such as `[1.0,2.0)`, or `LATEST` / `RELEASE`.
    pub constraint: String,
    /// The version this node had before dependency management or a nearer
    /// declaration rewrote it.
    pub premanaged_version: Option<String>,
    pub optional: bool,
}

impl DependencyNode {
    pub fn new(coordinate: ArtifactCoordinate) -> Self {
        let constraint = coordinate.version.clone();
        Self {
            coordinate,
            constraint,
            premanaged_version: None,
            optional: false,
        }
    }

    pub fn with_constraint(mut self, constraint: &str) -> Self {
        self.constraint = constraint.to_string();
        self
    }

    pub fn with_premanaged_version(mut self, version: &str) -> Self {
        self.premanaged_version = Some(version.to_string());
        self
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn version(&self) -> &str {
        &self.coordinate.version
    }

    /// `true` if management replaced the originally requested version.
    pub fn is_managed(&self) -> bool {
        self.premanaged_version
            .as_deref()
            .is_some_and(|v| v != self.coordinate.version)
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)
    }
}

/// A resolved dependency tree backed by petgraph.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    graph: DiGraph<DependencyNode, ()>,
    root: NodeIndex,
}

impl DependencyGraph {
    /// Start a graph from the project itself.
    pub fn new(root: DependencyNode) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(root);
        Self { graph, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Append `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: DependencyNode) -> NodeId {
        let idx = self.graph.add_node(node);
        self.graph.add_edge(parent, idx, ());
        idx
    }

    pub fn node(&self, idx: NodeId) -> &DependencyNode {
        &self.graph[idx]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() <= 1
    }

    /// Children in declaration order.
    pub fn children(&self, idx: NodeId) -> Vec<NodeId> {
        // petgraph walks adjacency newest-first; edge ids record insertion order
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (e.id(), e.target()))
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, target)| target).collect()
    }

    pub fn parent(&self, idx: NodeId) -> Option<NodeId> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    /// Distance from the root (root = 0).
    pub fn depth(&self, idx: NodeId) -> usize {
        let mut depth = 0;
        let mut current = idx;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Nodes from the root down to `idx`, inclusive.
    pub fn path_to(&self, idx: NodeId) -> Vec<NodeId> {
        let mut path = vec![idx];
        let mut current = idx;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    /// Depth-first pre-order walk from the root, with each node's depth.
    pub fn pre_order(&self) -> Vec<(NodeId, usize)> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack = vec![(self.root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            order.push((idx, depth));
            for child in self.children(idx).into_iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        order
    }

    /// Print the dependency tree to a string. `max_depth` of `Some(0)`
    /// prints only the root.
    pub fn print_tree(&self, max_depth: Option<usize>) -> String {
        let mut output = format!("{}\n", self.graph[self.root]);
        if max_depth == Some(0) {
            return output;
        }
        let children = self.children(self.root);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(&mut output, child, "", i == count - 1, 1, max_depth);
        }
        output
    }

    fn print_subtree(
        &self,
        output: &mut String,
        idx: NodeId,
        prefix: &str,
        is_last: bool,
        depth: usize,
        max_depth: Option<usize>,
    ) {
        let connector = if is_last { "└── " } else { "├── " };
        let node = &self.graph[idx];
        output.push_str(&format!("{prefix}{connector}{node}"));
        if let Some(scope) = node.coordinate.scope.as_deref() {
            if scope != crate::artifact::DEFAULT_SCOPE {
                output.push_str(&format!(" ({scope})"));
            }
        }
        if node.optional {
            output.push_str(" (optional)");
        }
        output.push('\n');

        if max_depth.is_some_and(|max| depth >= max) {
            return;
        }

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
        let children = self.children(idx);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            self.print_subtree(
                output,
                child,
                &child_prefix,
                i == count - 1,
                depth + 1,
                max_depth,
            );
        }
    }
}
