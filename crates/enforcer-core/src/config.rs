use serde::{Deserialize, Serialize};
use std::path::Path;

use enforcer_util::errors::EnforcerError;

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "Enforcer.toml";

/// Top-level configuration loaded from `Enforcer.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnforcerConfig {
    /// Fail the run when an ERROR-level rule reports violations.
    #[serde(default = "default_fail")]
    pub fail: bool,

    #[serde(default)]
    pub rules: RulesConfig,
}

impl Default for EnforcerConfig {
    fn default() -> Self {
        Self {
            fail: default_fail(),
            rules: RulesConfig::default(),
        }
    }
}

fn default_fail() -> bool {
    true
}

/// Rule tables from `[rules.*]`. An absent table disables the rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RulesConfig {
    #[serde(default)]
    pub dependency_convergence: Option<ConvergenceConfig>,
    #[serde(default)]
    pub require_upper_bound_deps: Option<UpperBoundConfig>,
    #[serde(default)]
    pub ban_transitive_dependencies: Option<BanTransitiveConfig>,
    #[serde(default)]
    pub ban_dynamic_versions: Option<BanDynamicVersionsConfig>,
    #[serde(default)]
    pub banned_dependencies: Option<BannedDependenciesConfig>,
}

/// What a failing rule does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    #[default]
    Error,
    Warn,
}

/// `[rules.dependency-convergence]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConvergenceConfig {
    /// Compare exact versions instead of snapshot base versions.
    #[serde(default)]
    pub unique_versions: bool,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub level: RuleLevel,
}

/// `[rules.require-upper-bound-deps]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UpperBoundConfig {
    #[serde(default)]
    pub unique_versions: bool,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub level: RuleLevel,
}

/// `[rules.ban-transitive-dependencies]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BanTransitiveConfig {
    /// Transitive dependencies allowed anyway; their subtrees are skipped.
    #[serde(default)]
    pub excludes: Vec<String>,
    /// Re-ban artifacts that an exclude pattern would let through.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub level: RuleLevel,
}

/// `[rules.ban-dynamic-versions]`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BanDynamicVersionsConfig {
    #[serde(default)]
    pub allow_snapshots: bool,
    #[serde(default)]
    pub allow_latest: bool,
    #[serde(default)]
    pub allow_release: bool,
    #[serde(default)]
    pub allow_ranges: bool,
    #[serde(default)]
    pub allow_ranges_with_identical_bounds: bool,
    #[serde(default)]
    pub exclude_optionals: bool,
    #[serde(default)]
    pub excluded_scopes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub level: RuleLevel,
}

/// `[rules.banned-dependencies]`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BannedDependenciesConfig {
    #[serde(default = "default_search_transitive")]
    pub search_transitive: bool,
    #[serde(default)]
    pub excludes: Vec<String>,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub level: RuleLevel,
}

impl Default for BannedDependenciesConfig {
    fn default() -> Self {
        Self {
            search_transitive: default_search_transitive(),
            excludes: Vec::new(),
            includes: Vec::new(),
            level: RuleLevel::default(),
        }
    }
}

fn default_search_transitive() -> bool {
    true
}

impl EnforcerConfig {
    /// Load the configuration from `path`, or return defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, EnforcerError> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| EnforcerError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, EnforcerError> {
        toml::from_str(content).map_err(|e| EnforcerError::Config {
            message: format!("Failed to parse configuration: {e}"),
        })
    }
}

/// Stable identity of a rule configuration, for result caching.
pub fn cache_id<T: Serialize>(config: &T) -> String {
    // Plain config structs always serialize
    let canonical = serde_json::to_string(config).unwrap_or_default();
    enforcer_util::hash::sha256_bytes(canonical.as_bytes())
}
