//! Grouping of dependency occurrences by conflict key.
//!
//! One pre-order walk of the tree collects every non-root node under its
//! conflict key together with its hop count (depth below the root's direct
//! dependencies). Each group stays sorted by hop count; ties keep walk order,
//! so the first entry of a group is the one a nearest-wins resolver picks.

use std::collections::BTreeMap;
use std::fmt;

use enforcer_core::artifact::ConflictKeyStyle;
use enforcer_core::graph::{DependencyGraph, NodeId};

/// A node together with its distance from the root's direct dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopPair {
    pub node: NodeId,
    pub hops: usize,
}

/// All occurrences of every library, grouped by conflict key.
#[derive(Debug, Default)]
pub struct ConflictGroups {
    groups: BTreeMap<String, Vec<HopPair>>,
}

impl ConflictGroups {
    /// Walk `graph` once and group its nodes.
    pub fn collect(graph: &DependencyGraph, style: ConflictKeyStyle) -> Self {
        let mut groups = Self::default();
        for (node, depth) in graph.pre_order() {
            if depth == 0 {
                continue;
            }
            let key = graph.node(node).coordinate.conflict_key(style);
            groups.insert(
                key,
                HopPair {
                    node,
                    hops: depth - 1,
                },
            );
        }
        tracing::debug!("grouped {} nodes into {} conflict keys", graph.len() - 1, groups.len());
        groups
    }

    fn insert(&mut self, key: String, pair: HopPair) {
        let list = self.groups.entry(key).or_default();
        // Stable: equal hop counts stay in walk order
        let at = list.partition_point(|p| p.hops <= pair.hops);
        list.insert(at, pair);
    }

    pub fn get(&self, key: &str) -> Option<&[HopPair]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HopPair])> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for ConflictGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.groups.is_empty() {
            return write!(f, "No dependencies.");
        }
        for (key, pairs) in &self.groups {
            let hops: Vec<String> = pairs.iter().map(|p| p.hops.to_string()).collect();
            writeln!(f, "{key} (hops: {})", hops.join(", "))?;
        }
        Ok(())
    }
}
