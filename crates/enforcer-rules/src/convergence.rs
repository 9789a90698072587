//! Rule: every library in the tree resolves to one version.

use enforcer_core::artifact::ConflictKeyStyle;
use enforcer_core::config::{self, ConvergenceConfig, RuleLevel};
use enforcer_core::graph::{DependencyGraph, NodeId};
use enforcer_core::pattern::ArtifactFilter;
use enforcer_core::version;
use enforcer_util::errors::EnforcerError;

use crate::conflict::ConflictGroups;
use crate::report;
use crate::rule::{EnforcerRule, RuleOutcome, Violation};

pub const NAME: &str = "dependency-convergence";

pub struct DependencyConvergence {
    unique_versions: bool,
    filter: ArtifactFilter,
    level: RuleLevel,
    cache_id: String,
}

impl DependencyConvergence {
    pub fn new(config: &ConvergenceConfig) -> Result<Self, EnforcerError> {
        Ok(Self {
            unique_versions: config.unique_versions,
            filter: ArtifactFilter::compile(&config.excludes, &config.includes)?,
            level: config.level,
            cache_id: config::cache_id(config),
        })
    }

    /// The version a node is compared by: exact, or with the snapshot
    /// timestamp collapsed.
    fn compared_version(&self, graph: &DependencyGraph, node: NodeId) -> String {
        let v = graph.node(node).version();
        if self.unique_versions {
            v.to_string()
        } else {
            version::base_version(v)
        }
    }

    /// One violation per conflict key with more than one distinct version.
    pub fn find_divergences(
        &self,
        graph: &DependencyGraph,
        groups: &ConflictGroups,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (key, pairs) in groups.iter() {
            let Some(nearest) = pairs.first() else {
                continue;
            };
            if !self.filter.selects(&graph.node(nearest.node).coordinate) {
                continue;
            }
            let versions: Vec<(String, NodeId)> = pairs
                .iter()
                .map(|p| (self.compared_version(graph, p.node), p.node))
                .collect();
            let first = &versions[0].0;
            if versions.iter().all(|(v, _)| v == first) {
                continue;
            }
            tracing::debug!("{key} does not converge");
            violations.push(Violation::Divergence {
                key: key.to_string(),
                versions,
            });
        }
        violations
    }

    fn render(&self, graph: &DependencyGraph, violations: &[Violation]) -> String {
        let mut out = String::new();
        for violation in violations {
            let Violation::Divergence { versions, .. } = violation else {
                continue;
            };
            let Some(&(_, first)) = versions.first() else {
                continue;
            };
            out.push_str(&format!(
                "\nDependency convergence error for {} paths to dependency are:\n",
                report::node_label(graph, first)
            ));
            let nodes: Vec<NodeId> = versions.iter().map(|(_, n)| *n).collect();
            out.push_str(&report::render_paths(graph, &nodes));
        }
        out
    }
}

impl EnforcerRule for DependencyConvergence {
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
        let groups = ConflictGroups::collect(graph, ConflictKeyStyle::GroupArtifact);
        let violations = self.find_divergences(graph, &groups);
        if violations.is_empty() {
            return RuleOutcome::pass(NAME, self.level);
        }
        let message = format!(
            "Failed while enforcing releasability.{}",
            self.render(graph, &violations)
        );
        RuleOutcome {
            rule: NAME.to_string(),
            level: self.level,
            violations,
            message,
        }
    }
}
