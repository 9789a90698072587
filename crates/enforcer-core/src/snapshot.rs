//! Serialized form of a resolved dependency tree.
//!
//! The upstream resolver writes the tree as nested JSON (or TOML) and the
//! enforcer rebuilds a [`DependencyGraph`] from it.

use std::path::Path;

use enforcer_util::errors::EnforcerError;
use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactCoordinate, DEFAULT_SCOPE, DEFAULT_TYPE};
use crate::graph::{DependencyGraph, DependencyNode, NodeId};

/// One node of a serialized tree, with its children inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeSnapshot {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    /// Requested version before resolution; defaults to `version`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premanaged_version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Read a snapshot file; `.toml` files are parsed as TOML, anything else
    /// as JSON.
    pub fn from_path(path: &Path) -> Result<Self, EnforcerError> {
        let content = std::fs::read_to_string(path).map_err(|e| EnforcerError::Graph {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        if is_toml {
            toml::from_str(&content).map_err(|e| EnforcerError::Graph {
                message: format!("Failed to parse {}: {e}", path.display()),
            })
        } else {
            Self::from_json(&content)
        }
    }

    pub fn from_json(content: &str) -> Result<Self, EnforcerError> {
        serde_json::from_str(content).map_err(|e| EnforcerError::Graph {
            message: format!("Failed to parse graph snapshot: {e}"),
        })
    }

    fn to_node(&self, is_root: bool) -> Result<DependencyNode, EnforcerError> {
        if self.group.trim().is_empty() || self.artifact.trim().is_empty() {
            return Err(EnforcerError::Graph {
                message: format!(
                    "node '{}:{}:{}' is missing its group or artifact id",
                    self.group, self.artifact, self.version
                ),
            });
        }
        let scope = match (&self.scope, is_root) {
            (Some(scope), _) => Some(scope.clone()),
            (None, true) => None,
            (None, false) => Some(DEFAULT_SCOPE.to_string()),
        };
        let coordinate = ArtifactCoordinate {
            group_id: self.group.clone(),
            artifact_id: self.artifact.clone(),
            version: self.version.clone(),
            artifact_type: self
                .artifact_type
                .clone()
                .unwrap_or_else(|| DEFAULT_TYPE.to_string()),
            classifier: self.classifier.clone(),
            scope,
        };
        Ok(DependencyNode {
            constraint: self
                .constraint
                .clone()
                .unwrap_or_else(|| self.version.clone()),
            coordinate,
            premanaged_version: self.premanaged_version.clone(),
            optional: self.optional,
        })
    }
}

impl DependencyGraph {
    /// Build a graph from a snapshot.
    pub fn from_snapshot(root: &NodeSnapshot) -> Result<Self, EnforcerError> {
        let mut graph = DependencyGraph::new(root.to_node(true)?);
        let mut stack: Vec<(NodeId, &NodeSnapshot)> = vec![(graph.root(), root)];
        while let Some((parent, snapshot)) = stack.pop() {
            for child in &snapshot.children {
                let idx = graph.add_child(parent, child.to_node(false)?);
                stack.push((idx, child));
            }
        }
        tracing::debug!(
            "built dependency graph for {} with {} nodes",
            graph.node(graph.root()),
            graph.len()
        );
        Ok(graph)
    }

    /// Serialize the graph back into its snapshot form.
    pub fn to_snapshot(&self) -> NodeSnapshot {
        self.snapshot_of(self.root())
    }

    fn snapshot_of(&self, idx: NodeId) -> NodeSnapshot {
        let node = self.node(idx);
        let c = &node.coordinate;
        NodeSnapshot {
            group: c.group_id.clone(),
            artifact: c.artifact_id.clone(),
            version: c.version.clone(),
            artifact_type: Some(c.artifact_type.clone()),
            classifier: c.classifier.clone(),
            scope: c.scope.clone(),
            optional: node.optional,
            constraint: Some(node.constraint.clone()),
            premanaged_version: node.premanaged_version.clone(),
            children: self
                .children(idx)
                .into_iter()
                .map(|child| self.snapshot_of(child))
                .collect(),
        }
    }

    /// SHA-256 over the canonical snapshot; identical trees hash identically.
    pub fn fingerprint(&self) -> String {
        // Serializing a plain struct tree into a String cannot fail
        let canonical = serde_json::to_string(&self.to_snapshot()).unwrap_or_default();
        enforcer_util::hash::sha256_bytes(canonical.as_bytes())
    }
}
