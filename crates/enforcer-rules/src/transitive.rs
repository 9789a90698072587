//! Rule: only direct dependencies are allowed.
//!
//! Excluded artifacts are allowed and their subtrees are not inspected.

use enforcer_core::config::{self, BanTransitiveConfig, RuleLevel};
use enforcer_core::graph::{DependencyGraph, NodeId};
use enforcer_core::pattern::ArtifactFilter;
use enforcer_util::errors::EnforcerError;

use crate::report::{self, TreeLine};
use crate::rule::{EnforcerRule, RuleOutcome, Violation};

pub const NAME: &str = "ban-transitive-dependencies";

pub struct BanTransitiveDependencies {
    filter: ArtifactFilter,
    level: RuleLevel,
    cache_id: String,
}

/// What one subtree contributes to the result.
#[derive(Debug, Default)]
struct Subtree {
    /// The subtree holds a non-excluded node below depth 1.
    has_transitive: bool,
    lines: Vec<TreeLine>,
    violations: Vec<NodeId>,
}

impl BanTransitiveDependencies {
    pub fn new(config: &BanTransitiveConfig) -> Result<Self, EnforcerError> {
        Ok(Self {
            filter: ArtifactFilter::compile(&config.excludes, &config.includes)?,
            level: config.level,
            cache_id: config::cache_id(config),
        })
    }

    fn search(&self, graph: &DependencyGraph, node: NodeId, depth: usize) -> Subtree {
        if self.filter.is_excluded(&graph.node(node).coordinate) {
            return Subtree {
                has_transitive: false,
                lines: vec![TreeLine {
                    node,
                    indent: depth,
                    excluded: true,
                }],
                violations: Vec::new(),
            };
        }

        let mut below = Subtree::default();
        for child in graph.children(node) {
            let sub = self.search(graph, child, depth + 1);
            below.has_transitive |= sub.has_transitive;
            below.lines.extend(sub.lines);
            below.violations.extend(sub.violations);
        }

        let banned = depth > 1;
        let has_transitive = banned || below.has_transitive;
        let mut violations = Vec::new();
        if banned {
            violations.push(node);
        }
        violations.extend(below.violations);

        let mut lines = Vec::new();
        if has_transitive {
            lines.push(TreeLine {
                node,
                indent: depth,
                excluded: false,
            });
            lines.extend(below.lines);
        }

        Subtree {
            has_transitive,
            lines,
            violations,
        }
    }
}

impl EnforcerRule for BanTransitiveDependencies {
    fn name(&self) -> &'static str {
        NAME
    }

    fn level(&self) -> RuleLevel {
        self.level
    }

    fn cache_id(&self) -> String {
        self.cache_id.clone()
    }

    fn evaluate(&self, graph: &DependencyGraph) -> RuleOutcome {
        let root = graph.root();
        let mut tree = Subtree::default();
        for child in graph.children(root) {
            let sub = self.search(graph, child, 1);
            tree.has_transitive |= sub.has_transitive;
            tree.lines.extend(sub.lines);
            tree.violations.extend(sub.violations);
        }

        if !tree.has_transitive {
            return RuleOutcome::pass(NAME, self.level);
        }

        let mut lines = vec![TreeLine {
            node: root,
            indent: 0,
            excluded: false,
        }];
        lines.extend(tree.lines);
        let message = format!(
            "Transitive dependencies were found:\n{}",
            report::render_lines(graph, &lines)
        );
        RuleOutcome {
            rule: NAME.to_string(),
            level: self.level,
            violations: tree
                .violations
                .into_iter()
                .map(|node| Violation::Transitive { node })
                .collect(),
            message,
        }
    }
}
