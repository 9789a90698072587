//! Rule: artifacts matching the exclude patterns must not appear, unless an
//! include pattern lets them back in.

use enforcer_core::config::{self, BannedDependenciesConfig, RuleLevel};
use enforcer_core::graph::{DependencyGraph, NodeId};
use enforcer_core::pattern::ArtifactFilter;
use enforcer_util::errors::EnforcerError;

use crate::report;
use crate::rule::{EnforcerRule, RuleOutcome, Violation};
use crate::visit::{self, NodeVisit};

pub const NAME: &str = "banned-dependencies";

pub struct BannedDependencies {
    search_transitive: bool,
    filter: ArtifactFilter,
    level: RuleLevel,
    cache_id: String,
}

impl BannedDependencies {
    pub fn new(config: &BannedDependenciesConfig) -> Result<Self, EnforcerError> {
        Ok(Self {
            search_transitive: config.search_transitive,
            filter: ArtifactFilter::compile(&config.excludes, &config.includes)?,
            level: config.level,
            cache_id: config::cache_id(config),
        })
    }

    fn inspect(&self, graph: &DependencyGraph, node: NodeId) -> NodeVisit<String> {
        let coord = &graph.node(node).coordinate;
        let prune = !self.search_transitive;
        if !self.filter.is_excluded(coord) {
            return NodeVisit {
                prune,
                finding: None,
            };
        }
        let pattern = self
            .filter
            .excludes
            .find(coord)
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        NodeVisit::report(pattern, prune)
    }
}

impl EnforcerRule for BannedDependencies {
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
        let found = visit::walk(graph, |node, _| self.inspect(graph, node));
        if found.is_empty() {
            return RuleOutcome::pass(NAME, self.level);
        }

        let mut message = String::new();
        for f in &found {
            message.push_str(&format!(
                "Found Banned Dependency: {}{}\n",
                graph.node(f.node).coordinate.full_name(),
                report::via_path(graph, f.node)
            ));
        }
        message.push_str("Use 'enforcer tree' to locate the source of the banned dependencies.");

        RuleOutcome {
            rule: NAME.to_string(),
            level: self.level,
            violations: found
                .into_iter()
                .map(|f| Violation::Banned {
                    node: f.node,
                    pattern: f.finding,
                })
                .collect(),
            message,
        }
    }
}
