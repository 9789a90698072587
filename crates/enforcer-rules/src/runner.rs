//! Builds the configured rules and evaluates them against a graph.

use enforcer_core::config::{EnforcerConfig, RuleLevel};
use enforcer_core::graph::DependencyGraph;
use enforcer_util::errors::{EnforcerError, EnforcerResult};

use crate::banned::BannedDependencies;
use crate::cache::ResultCache;
use crate::convergence::DependencyConvergence;
use crate::dynamic_versions::BanDynamicVersions;
use crate::report;
use crate::rule::{EnforcerRule, RuleOutcome};
use crate::transitive::BanTransitiveDependencies;
use crate::upper_bound::RequireUpperBoundDeps;

/// The set of enabled rules, in evaluation order.
pub struct Enforcer {
    rules: Vec<Box<dyn EnforcerRule>>,
    fail: bool,
}

impl Enforcer {
    /// Compile every rule with a table in the config. Fails on the first
    /// invalid pattern.
    pub fn from_config(config: &EnforcerConfig) -> Result<Self, EnforcerError> {
        let rules = &config.rules;
        let mut enabled: Vec<Box<dyn EnforcerRule>> = Vec::new();
        if let Some(c) = &rules.dependency_convergence {
            enabled.push(Box::new(DependencyConvergence::new(c)?));
        }
        if let Some(c) = &rules.require_upper_bound_deps {
            enabled.push(Box::new(RequireUpperBoundDeps::new(c)?));
        }
        if let Some(c) = &rules.ban_transitive_dependencies {
            enabled.push(Box::new(BanTransitiveDependencies::new(c)?));
        }
        if let Some(c) = &rules.ban_dynamic_versions {
            enabled.push(Box::new(BanDynamicVersions::new(c)?));
        }
        if let Some(c) = &rules.banned_dependencies {
            enabled.push(Box::new(BannedDependencies::new(c)?));
        }
        Ok(Self {
            rules: enabled,
            fail: config.fail,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn EnforcerRule> {
        self.rules.iter().map(|r| r.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether ERROR-level failures should fail the run.
    pub fn fails_on_error(&self) -> bool {
        self.fail
    }

    /// Evaluate every rule, reusing cached outcomes where possible.
    pub fn run(&self, graph: &DependencyGraph, cache: &mut ResultCache) -> EnforcementSummary {
        let fingerprint = graph.fingerprint();
        let mut outcomes = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let cache_id = rule.cache_id();
            let outcome = match cache.get(rule.name(), &cache_id, &fingerprint) {
                Some(hit) => {
                    tracing::debug!("reusing cached result for {}", rule.name());
                    hit.clone()
                }
                None => {
                    let outcome = rule.evaluate(graph);
                    cache.insert(&cache_id, &fingerprint, outcome.clone());
                    outcome
                }
            };

            if outcome.passed() {
                tracing::info!("rule {} passed", outcome.rule);
            } else {
                match outcome.level {
                    RuleLevel::Error => tracing::error!(
                        "rule {} failed with {} violation(s)",
                        outcome.rule,
                        outcome.violations.len()
                    ),
                    RuleLevel::Warn => tracing::warn!(
                        "rule {} failed with {} violation(s)",
                        outcome.rule,
                        outcome.violations.len()
                    ),
                }
            }
            outcomes.push(outcome);
        }

        EnforcementSummary { outcomes }
    }
}

/// Outcomes of one enforcement run.
#[derive(Debug, Clone)]
pub struct EnforcementSummary {
    pub outcomes: Vec<RuleOutcome>,
}

impl EnforcementSummary {
    pub fn errors(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes.iter().filter(|o| o.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &RuleOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed() && o.level == RuleLevel::Warn)
    }

    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(RuleOutcome::passed)
    }

    /// Turn ERROR-level failures into an error when `fail` is set.
    pub fn check(&self, fail: bool) -> EnforcerResult<()> {
        let errors: Vec<&RuleOutcome> = self.errors().collect();
        if errors.is_empty() || !fail {
            return Ok(());
        }
        Err(EnforcerError::RulesFailed {
            count: errors.len(),
            message: report::summarize(errors),
        }
        .into())
    }
}
