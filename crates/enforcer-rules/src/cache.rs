//! Memo of rule outcomes for a session.
//!
//! An outcome is reused when the same rule, configured the same way, meets
//! a graph with the same fingerprint.

use std::collections::HashMap;

use enforcer_util::hash;

use crate::rule::RuleOutcome;

#[derive(Debug, Default)]
pub struct ResultCache {
    outcomes: HashMap<String, RuleOutcome>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(rule: &str, cache_id: &str, graph_fingerprint: &str) -> String {
        hash::fingerprint([rule, cache_id, graph_fingerprint])
    }

    pub fn get(&self, rule: &str, cache_id: &str, graph_fingerprint: &str) -> Option<&RuleOutcome> {
        self.outcomes.get(&Self::key(rule, cache_id, graph_fingerprint))
    }

    /// Record an outcome. Returns `false` if one was already stored.
    pub fn insert(
        &mut self,
        cache_id: &str,
        graph_fingerprint: &str,
        outcome: RuleOutcome,
    ) -> bool {
        let key = Self::key(&outcome.rule, cache_id, graph_fingerprint);
        self.outcomes.insert(key, outcome).is_none()
    }

    pub fn contains(&self, rule: &str, cache_id: &str, graph_fingerprint: &str) -> bool {
        self.outcomes.contains_key(&Self::key(rule, cache_id, graph_fingerprint))
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enforcer_core::config::RuleLevel;

    #[test]
    fn outcome_tracking() {
        let mut cache = ResultCache::new();
        let outcome = RuleOutcome::pass("banned-dependencies", RuleLevel::Error);
        assert!(cache.insert("cfg", "graph", outcome.clone()));
        assert!(!cache.insert("cfg", "graph", outcome));
        assert!(cache.contains("banned-dependencies", "cfg", "graph"));
        assert!(!cache.contains("banned-dependencies", "cfg", "other-graph"));
        assert!(!cache.contains("banned-dependencies", "other-cfg", "graph"));
        assert_eq!(cache.len(), 1);
    }
}
