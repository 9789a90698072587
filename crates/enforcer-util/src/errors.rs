use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all enforcer operations.
#[derive(Debug, Error, Diagnostic)]
pub enum EnforcerError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or unreadable configuration (e.g. Enforcer.toml).
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check your Enforcer.toml for syntax errors"))]
    Config { message: String },

    /// An artifact pattern could not be compiled.
    #[error("Invalid artifact pattern '{pattern}': {message}")]
    #[diagnostic(help(
        "Patterns look like groupId:artifactId:version:type:scope:classifier, with '*' wildcards"
    ))]
    InvalidPattern { pattern: String, message: String },

    /// A version range specification is malformed.
    #[error("Invalid version range '{spec}': {message}")]
    #[diagnostic(help("Ranges look like [1.0,2.0), (,1.5], [1.2] or a bare version"))]
    InvalidRangeSpec { spec: String, message: String },

    /// The dependency graph handed to the engine is structurally broken.
    #[error("Dependency graph error: {message}")]
    Graph { message: String },

    /// One or more ERROR-level rules reported violations.
    #[error("{count} rule(s) failed:\n{message}")]
    RulesFailed { count: usize, message: String },
}

impl EnforcerError {
    pub fn range(spec: &str, message: impl Into<String>) -> Self {
        Self::InvalidRangeSpec {
            spec: spec.to_string(),
            message: message.into(),
        }
    }

    pub fn pattern(pattern: &str, message: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type EnforcerResult<T> = miette::Result<T>;
