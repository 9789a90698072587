//! Rendering of violations into human-readable reports.
//!
//! Paths print as indented trees, root first, two spaces per level:
//!
//! ```text
//! +-- com.example:app:1.0
//!   +-- org.a:a:1.0
//!     +-- org.c:c:2.0 (managed) <-- 1.5
//! ```

use enforcer_core::artifact::DEFAULT_SCOPE;
use enforcer_core::graph::{DependencyGraph, NodeId};

use crate::rule::RuleOutcome;

/// One line of a rendered tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeLine {
    pub node: NodeId,
    /// Indentation level; 0 is flush left.
    pub indent: usize,
    pub excluded: bool,
}

/// Display name of a node: `g:a:v`, then the managed-version and scope notes.
pub fn node_label(graph: &DependencyGraph, node: NodeId) -> String {
    let n = graph.node(node);
    let mut label = n.coordinate.to_string();
    if n.is_managed() {
        if let Some(original) = &n.premanaged_version {
            label.push_str(&format!(" (managed) <-- {original}"));
        }
    }
    if let Some(scope) = n.coordinate.scope.as_deref() {
        if scope != DEFAULT_SCOPE {
            label.push_str(&format!(" [{scope}]"));
        }
    }
    label
}

/// Render the path from the root down to `node`.
pub fn render_path(graph: &DependencyGraph, node: NodeId) -> String {
    let lines: Vec<TreeLine> = graph
        .path_to(node)
        .into_iter()
        .enumerate()
        .map(|(indent, node)| TreeLine {
            node,
            indent,
            excluded: false,
        })
        .collect();
    render_lines(graph, &lines)
}

/// Render several paths, separated by `and`.
pub fn render_paths(graph: &DependencyGraph, nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(|&n| render_path(graph, n))
        .collect::<Vec<_>>()
        .join("and\n")
}

pub fn render_lines(graph: &DependencyGraph, lines: &[TreeLine]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&"  ".repeat(line.indent));
        out.push_str("+-- ");
        out.push_str(&node_label(graph, line.node));
        if line.excluded {
            out.push_str(" [excluded]");
        }
        out.push('\n');
    }
    out
}

/// `" via a:1 -> b:2"` for the nodes strictly between the root and `node`,
/// or an empty string for a direct dependency.
pub fn via_path(graph: &DependencyGraph, node: NodeId) -> String {
    let path = graph.path_to(node);
    if path.len() <= 2 {
        return String::new();
    }
    let hops: Vec<String> = path[1..path.len() - 1]
        .iter()
        .map(|&n| graph.node(n).coordinate.to_string())
        .collect();
    format!(" via {}", hops.join(" -> "))
}

/// Aggregate message over the failed outcomes, one block per rule.
pub fn summarize<'a>(outcomes: impl IntoIterator<Item = &'a RuleOutcome>) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        if outcome.passed() {
            continue;
        }
        out.push_str(&format!(
            "Rule '{}' failed with {} violation(s):\n",
            outcome.rule,
            outcome.violations.len()
        ));
        out.push_str(&outcome.message);
        if !outcome.message.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use enforcer_core::artifact::ArtifactCoordinate;
    use enforcer_core::graph::DependencyNode;

    fn node(g: &str, a: &str, v: &str) -> DependencyNode {
        DependencyNode::new(ArtifactCoordinate::new(g, a, v))
    }

    fn chain() -> (DependencyGraph, NodeId, NodeId) {
        let mut g = DependencyGraph::new(node("com.example", "app", "1.0"));
        let root = g.root();
        let a = g.add_child(root, node("org.a", "a", "1.0"));
        let c = g.add_child(a, node("org.c", "c", "2.0").with_premanaged_version("1.5"));
        (g, a, c)
    }

    #[test]
    fn path_is_indented_per_level() {
        let (g, _, c) = chain();
        assert_eq!(
            render_path(&g, c),
            "+-- com.example:app:1.0\n  +-- org.a:a:1.0\n    +-- org.c:c:2.0 (managed) <-- 1.5\n"
        );
    }

    #[test]
    fn paths_joined_with_and() {
        let (g, a, c) = chain();
        let out = render_paths(&g, &[a, c]);
        assert!(out.contains("+-- org.a:a:1.0\nand\n+-- com.example:app:1.0"));
    }

    #[test]
    fn scope_is_annotated() {
        let mut g = DependencyGraph::new(node("com.example", "app", "1.0"));
        let root = g.root();
        let t = g.add_child(
            root,
            DependencyNode::new(ArtifactCoordinate::new("org.t", "t", "1.0").with_scope("test")),
        );
        assert_eq!(node_label(&g, t), "org.t:t:1.0 [test]");
    }

    #[test]
    fn via_path_skips_root_and_target() {
        let (g, a, c) = chain();
        assert_eq!(via_path(&g, a), "");
        assert_eq!(via_path(&g, c), " via org.a:a:1.0");
    }

    #[test]
    fn excluded_marker() {
        let (g, a, _) = chain();
        let out = render_lines(
            &g,
            &[TreeLine {
                node: a,
                indent: 1,
                excluded: true,
            }],
        );
        assert_eq!(out, "  +-- org.a:a:1.0 [excluded]\n");
    }
}
