//! Rule: dependencies must not be requested with dynamic versions.
//!
//! Works on version *constraints* as declared, before the resolver collapsed
//! them. A banned node is reported once; nothing beneath it is inspected.

use enforcer_core::config::{self, BanDynamicVersionsConfig, RuleLevel};
use enforcer_core::graph::{DependencyGraph, DependencyNode};
use enforcer_core::pattern::PatternList;
use enforcer_core::range::VersionRange;
use enforcer_core::version;
use enforcer_util::errors::EnforcerError;

use crate::report;
use crate::rule::{DynamicKind, EnforcerRule, RuleOutcome, Violation};
use crate::visit::{self, NodeVisit};

pub const NAME: &str = "ban-dynamic-versions";

const LATEST: &str = "LATEST";
const RELEASE: &str = "RELEASE";

pub struct BanDynamicVersions {
    allow_snapshots: bool,
    allow_latest: bool,
    allow_release: bool,
    allow_ranges: bool,
    allow_ranges_with_identical_bounds: bool,
    exclude_optionals: bool,
    excluded_scopes: Vec<String>,
    ignores: PatternList,
    level: RuleLevel,
    cache_id: String,
}

impl BanDynamicVersions {
    pub fn new(config: &BanDynamicVersionsConfig) -> Result<Self, EnforcerError> {
        Ok(Self {
            allow_snapshots: config.allow_snapshots,
            allow_latest: config.allow_latest,
            allow_release: config.allow_release,
            allow_ranges: config.allow_ranges,
            allow_ranges_with_identical_bounds: config.allow_ranges_with_identical_bounds,
            exclude_optionals: config.exclude_optionals,
            excluded_scopes: config.excluded_scopes.clone(),
            ignores: PatternList::compile(&config.ignores)?,
            level: config.level,
            cache_id: config::cache_id(config),
        })
    }

    /// The kind of banned dynamic version `constraint` is, if any.
    pub fn classify(&self, constraint: &str) -> Option<DynamicKind> {
        let constraint = constraint.trim();
        if constraint == LATEST {
            return (!self.allow_latest).then_some(DynamicKind::Latest);
        }
        if constraint == RELEASE {
            return (!self.allow_release).then_some(DynamicKind::Release);
        }
        if constraint.starts_with('[') || constraint.starts_with('(') {
            if self.allow_ranges {
                return None;
            }
            let pinned = self.allow_ranges_with_identical_bounds
                && VersionRange::parse(constraint).is_ok_and(|r| r.has_identical_bounds());
            return (!pinned).then_some(DynamicKind::Range);
        }
        if version::is_snapshot(constraint) {
            return (!self.allow_snapshots).then_some(DynamicKind::Snapshot);
        }
        None
    }

    fn is_ignored(&self, node: &DependencyNode) -> bool {
        let scope = node.coordinate.scope_or_default();
        (self.exclude_optionals && node.optional)
            || self.excluded_scopes.iter().any(|s| s == scope)
            || self.ignores.matches(&node.coordinate)
    }

    fn inspect(&self, node: &DependencyNode) -> NodeVisit<DynamicKind> {
        if self.is_ignored(node) {
            tracing::debug!("skipping {} and its dependencies", node.coordinate);
            return NodeVisit::prune();
        }
        match self.classify(&node.constraint) {
            Some(kind) => NodeVisit::report(kind, true),
            None => NodeVisit::descend(),
        }
    }
}

impl EnforcerRule for BanDynamicVersions {
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
        let found = visit::walk(graph, |node, _| self.inspect(graph.node(node)));
        if found.is_empty() {
            return RuleOutcome::pass(NAME, self.level);
        }

        let mut message = String::new();
        for f in &found {
            let node = graph.node(f.node);
            message.push_str(&format!(
                "Dependency {}{} is referenced with a banned dynamic version {}\n",
                node.coordinate,
                report::via_path(graph, f.node),
                node.constraint
            ));
        }
        let count = found.len();
        message.push_str(&format!(
            "Found {count} {} with dynamic versions.",
            if count == 1 { "dependency" } else { "dependencies" }
        ));

        RuleOutcome {
            rule: NAME.to_string(),
            level: self.level,
            violations: found
                .into_iter()
                .map(|f| Violation::DynamicVersion {
                    node: f.node,
                    constraint: graph.node(f.node).constraint.clone(),
                    kind: f.finding,
                })
                .collect(),
            message,
        }
    }
}
