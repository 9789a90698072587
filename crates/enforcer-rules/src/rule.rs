//! The rule contract and the structured results rules produce.

use enforcer_core::config::RuleLevel;
use enforcer_core::graph::{DependencyGraph, NodeId};

use crate::conflict::HopPair;

/// A dependency policy.
///
/// Implementations hold only compiled configuration, so one instance can be
/// evaluated against many graphs, from many threads.
pub trait EnforcerRule: Send + Sync {
    /// Kebab-case rule name, as used in `Enforcer.toml`.
    fn name(&self) -> &'static str;

    fn level(&self) -> RuleLevel;

    /// Fingerprint of the rule's configuration.
    fn cache_id(&self) -> String;

    fn evaluate(&self, graph: &DependencyGraph) -> RuleOutcome;
}

/// Why a version constraint counts as dynamic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicKind {
    Latest,
    Release,
    Snapshot,
    Range,
}

/// One policy violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// More than one version of the same library in the tree.
    Divergence {
        key: String,
        versions: Vec<(String, NodeId)>,
    },
    /// A deeper request needs a newer version than the nearest one resolved.
    UpperBound {
        key: String,
        resolved_version: String,
        group: Vec<HopPair>,
    },
    /// A dependency reached only through another dependency.
    Transitive { node: NodeId },
    /// A version constraint not pinned to one published artifact.
    DynamicVersion {
        node: NodeId,
        constraint: String,
        kind: DynamicKind,
    },
    /// An artifact matched by a banned pattern.
    Banned { node: NodeId, pattern: String },
}

impl Violation {
    /// Every node the violation refers to.
    pub fn nodes(&self) -> Vec<NodeId> {
        match self {
            Self::Divergence { versions, .. } => versions.iter().map(|(_, n)| *n).collect(),
            Self::UpperBound { group, .. } => group.iter().map(|p| p.node).collect(),
            Self::Transitive { node }
            | Self::DynamicVersion { node, .. }
            | Self::Banned { node, .. } => vec![*node],
        }
    }
}

/// Result of evaluating one rule against one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: String,
    pub level: RuleLevel,
    pub violations: Vec<Violation>,
    /// Rendered report; empty when the rule passed.
    pub message: String,
}

impl RuleOutcome {
    pub fn pass(rule: &str, level: RuleLevel) -> Self {
        Self {
            rule: rule.to_string(),
            level,
            violations: Vec::new(),
            message: String::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    /// `true` when the rule failed at ERROR level.
    pub fn is_error(&self) -> bool {
        !self.passed() && self.level == RuleLevel::Error
    }
}
