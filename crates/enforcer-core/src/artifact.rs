use std::fmt;

use serde::{Deserialize, Serialize};

use crate::version::{self, Version};

/// Packaging type assumed when none is given.
pub const DEFAULT_TYPE: &str = "jar";

/// Scope assumed for dependencies that do not declare one.
pub const DEFAULT_SCOPE: &str = "compile";

/// Maven coordinates of one artifact in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    #[serde(rename = "type", default = "default_type")]
    pub artifact_type: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_type() -> String {
    DEFAULT_TYPE.to_string()
}

/// Whether a conflict key carries the packaging type and classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictKeyStyle {
    /// `groupId:artifactId`
    #[default]
    GroupArtifact,
    /// `groupId:artifactId:type[:classifier]`
    Management,
}

impl ArtifactCoordinate {
    pub fn new(group_id: &str, artifact_id: &str, version: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            artifact_type: default_type(),
            classifier: None,
            scope: None,
        }
    }

    pub fn with_type(mut self, artifact_type: &str) -> Self {
        self.artifact_type = artifact_type.to_string();
        self
    }

    pub fn with_classifier(mut self, classifier: &str) -> Self {
        self.classifier = Some(classifier.to_string());
        self
    }

    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scope = Some(scope.to_string());
        self
    }

    /// Parse `group:artifact:version`, `group:artifact:type:version` or
    /// `group:artifact:type:classifier:version`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.iter().any(|p| p.is_empty()) {
            return None;
        }
        match parts.as_slice() {
            [g, a, v] => Some(Self::new(g, a, v)),
            [g, a, t, v] => Some(Self::new(g, a, v).with_type(t)),
            [g, a, t, c, v] => Some(Self::new(g, a, v).with_type(t).with_classifier(c)),
            _ => None,
        }
    }

    /// `group:artifact` identifier (without version).
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Key used to group occurrences of the same library. Version is never
    /// part of it.
    pub fn conflict_key(&self, style: ConflictKeyStyle) -> String {
        match style {
            ConflictKeyStyle::GroupArtifact => self.key(),
            ConflictKeyStyle::Management => match &self.classifier {
                Some(c) => format!("{}:{}:{c}", self.key(), self.artifact_type),
                None => format!("{}:{}", self.key(), self.artifact_type),
            },
        }
    }

    /// `group:artifact:type[:classifier]:version`
    pub fn full_name(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}:{}:{c}:{}",
                self.key(),
                self.artifact_type,
                self.version
            ),
            None => format!("{}:{}:{}", self.key(), self.artifact_type, self.version),
        }
    }

    pub fn parsed_version(&self) -> Version {
        Version::parse(&self.version)
    }

    /// Version with a timestamped snapshot collapsed to `-SNAPSHOT`.
    pub fn base_version(&self) -> String {
        version::base_version(&self.version)
    }

    pub fn scope_or_default(&self) -> &str {
        self.scope.as_deref().unwrap_or(DEFAULT_SCOPE)
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
