//! Rule: the nearest declaration must not resolve an older version than one
//! requested deeper in the tree.
//!
//! Nearest-wins resolution happily picks `1.0` at depth 1 over `2.0` needed
//! by a transitive dependency; that downgrade is what this rule reports.

use enforcer_core::artifact::ConflictKeyStyle;
use enforcer_core::config::{self, RuleLevel, UpperBoundConfig};
use enforcer_core::graph::{DependencyGraph, DependencyNode};
use enforcer_core::pattern::ArtifactFilter;
use enforcer_core::version::{self, Version};
use enforcer_util::errors::EnforcerError;

use crate::conflict::ConflictGroups;
use crate::report;
use crate::rule::{EnforcerRule, RuleOutcome, Violation};

pub const NAME: &str = "require-upper-bound-deps";

/// Which version of a node to judge it by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelectionMode {
    /// The version after dependency management, as resolved.
    Managed,
    /// The version originally requested, before management rewrote it.
    Raw,
}

pub struct RequireUpperBoundDeps {
    unique_versions: bool,
    filter: ArtifactFilter,
    level: RuleLevel,
    cache_id: String,
}

impl RequireUpperBoundDeps {
    pub fn new(config: &UpperBoundConfig) -> Result<Self, EnforcerError> {
        Ok(Self {
            unique_versions: config.unique_versions,
            filter: ArtifactFilter::compile(&config.excludes, &config.includes)?,
            level: config.level,
            cache_id: config::cache_id(config),
        })
    }

    pub fn extract_version(&self, node: &DependencyNode, mode: VersionSelectionMode) -> String {
        let raw = match mode {
            VersionSelectionMode::Managed => node.version(),
            VersionSelectionMode::Raw => node
                .premanaged_version
                .as_deref()
                .unwrap_or_else(|| node.version()),
        };
        if self.unique_versions {
            raw.to_string()
        } else {
            version::base_version(raw)
        }
    }

    /// Groups in which some member asks for a newer version than the
    /// resolved (nearest) one. The whole group is reported.
    pub fn find_upper_bound_violations(
        &self,
        graph: &DependencyGraph,
        groups: &ConflictGroups,
    ) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (key, pairs) in groups.iter() {
            let Some((resolved, others)) = pairs.split_first() else {
                continue;
            };
            // The nearest node decides whether the whole key is inspected
            if !self.filter.selects(&graph.node(resolved.node).coordinate) {
                continue;
            }

            let resolved_version =
                self.extract_version(graph.node(resolved.node), VersionSelectionMode::Managed);
            let ceiling = Version::parse(&resolved_version);
            let exceeded = others.iter().any(|p| {
                let requested = self.extract_version(graph.node(p.node), VersionSelectionMode::Raw);
                Version::parse(&requested) > ceiling
            });
            if exceeded {
                tracing::debug!("{key} resolved to {resolved_version} below a transitive request");
                violations.push(Violation::UpperBound {
                    key: key.to_string(),
                    resolved_version,
                    group: pairs.to_vec(),
                });
            }
        }
        violations
    }

    fn render(&self, graph: &DependencyGraph, violations: &[Violation]) -> String {
        let mut out = String::new();
        for violation in violations {
            let Violation::UpperBound { group, .. } = violation else {
                continue;
            };
            let Some(resolved) = group.first() else {
                continue;
            };
            out.push_str(&format!(
                "\nRequire upper bound dependencies error for {} paths to dependency are:\n",
                report::node_label(graph, resolved.node)
            ));
            let nodes: Vec<_> = group.iter().map(|p| p.node).collect();
            out.push_str(&report::render_paths(graph, &nodes));
        }
        out
    }
}

impl EnforcerRule for RequireUpperBoundDeps {
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
        let violations = self.find_upper_bound_violations(graph, &groups);
        if violations.is_empty() {
            return RuleOutcome::pass(NAME, self.level);
        }
        let message = format!(
            "Failed while enforcing RequireUpperBoundDeps. The error(s) are [{}\n]",
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
