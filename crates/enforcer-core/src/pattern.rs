//! Artifact pattern matching.
//!
//! A pattern is `groupId:artifactId:version:type:scope:classifier`, with any
//! trailing segments omitted. Each segment is `*` or empty (match anything),
//! a glob containing `*` (`org.apache.*`), or a literal. The version segment
//! may instead be a version range such as `[1.0,2.0)`.

use std::fmt;

use enforcer_util::errors::EnforcerError;
use globset::{GlobBuilder, GlobMatcher};

use crate::artifact::ArtifactCoordinate;
use crate::range::VersionRange;
use crate::version::Version;

const MAX_SEGMENTS: usize = 6;
const VERSION_SEGMENT: usize = 2;

/// How a version segment holding a bare version is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionMatch {
    /// [`VersionRange::contained_in_interval`]: a bare version pins exactly.
    #[default]
    Interval,
    /// [`VersionRange::satisfies_at_least`]: a bare version is a ceiling.
    AtLeast,
}

#[derive(Debug, Clone)]
enum SegmentMatcher {
    Any,
    Literal(String),
    Glob(GlobMatcher),
    Range(VersionRange),
}

impl SegmentMatcher {
    fn compile(pattern: &str, segment: &str, position: usize) -> Result<Self, EnforcerError> {
        if segment.is_empty() || segment == "*" {
            return Ok(Self::Any);
        }
        if segment.contains('*') {
            let glob = GlobBuilder::new(segment)
                .literal_separator(false)
                .build()
                .map_err(|e| EnforcerError::pattern(pattern, e.to_string()))?;
            return Ok(Self::Glob(glob.compile_matcher()));
        }
        if position == VERSION_SEGMENT {
            return Ok(Self::Range(VersionRange::parse(segment)?));
        }
        Ok(Self::Literal(segment.to_string()))
    }

    fn matches(&self, value: &str, mode: VersionMatch) -> bool {
        match self {
            Self::Any => true,
            Self::Literal(expected) => expected == value,
            Self::Glob(glob) => glob.is_match(value),
            Self::Range(range) => {
                let version = Version::parse(value);
                match mode {
                    VersionMatch::Interval => range.contained_in_interval(&version),
                    VersionMatch::AtLeast => range.satisfies_at_least(&version),
                }
            }
        }
    }
}

/// A compiled artifact pattern.
#[derive(Debug, Clone)]
pub struct ArtifactPattern {
    raw: String,
    segments: Vec<SegmentMatcher>,
    mode: VersionMatch,
}

impl ArtifactPattern {
    /// Compile a pattern with interval version matching.
    ///
    /// An empty (or all-whitespace) pattern compiles to one that never matches.
    pub fn compile(pattern: &str) -> Result<Self, EnforcerError> {
        Self::compile_with(pattern, VersionMatch::default())
    }

    pub fn compile_with(pattern: &str, mode: VersionMatch) -> Result<Self, EnforcerError> {
        let raw = pattern.trim();
        if raw.is_empty() {
            return Ok(Self {
                raw: String::new(),
                segments: Vec::new(),
                mode,
            });
        }

        let parts: Vec<&str> = raw.split(':').map(str::trim).collect();
        if parts.len() > MAX_SEGMENTS {
            return Err(EnforcerError::pattern(
                pattern,
                format!("expected at most {MAX_SEGMENTS} ':'-separated segments"),
            ));
        }
        let segments = parts
            .iter()
            .enumerate()
            .map(|(i, s)| SegmentMatcher::compile(pattern, s, i))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: raw.to_string(),
            segments,
            mode,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// AND across every present segment.
    pub fn matches(&self, coord: &ArtifactCoordinate) -> bool {
        if self.segments.is_empty() {
            return false;
        }
        let classifier = coord.classifier.as_deref().unwrap_or("");
        let fields: [&str; MAX_SEGMENTS] = [
            &coord.group_id,
            &coord.artifact_id,
            &coord.version,
            &coord.artifact_type,
            coord.scope_or_default(),
            classifier,
        ];
        self.segments
            .iter()
            .zip(fields)
            .all(|(segment, value)| segment.matches(value, self.mode))
    }
}

impl fmt::Display for ArtifactPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A list of patterns; matches if any member matches.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<ArtifactPattern>,
}

impl PatternList {
    /// Compile every pattern. Empty strings are dropped; the first malformed
    /// pattern aborts compilation.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, EnforcerError> {
        Self::compile_with(patterns, VersionMatch::default())
    }

    pub fn compile_with<S: AsRef<str>>(
        patterns: &[S],
        mode: VersionMatch,
    ) -> Result<Self, EnforcerError> {
        let patterns = patterns
            .iter()
            .map(|p| ArtifactPattern::compile_with(p.as_ref(), mode))
            .filter(|p| !p.as_ref().is_ok_and(ArtifactPattern::is_empty))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn matches(&self, coord: &ArtifactCoordinate) -> bool {
        self.find(coord).is_some()
    }

    /// The first pattern matching `coord`.
    pub fn find(&self, coord: &ArtifactCoordinate) -> Option<&ArtifactPattern> {
        self.patterns.iter().find(|p| p.matches(coord))
    }
}

/// A pair of exclude / include lists.
///
/// Rules read the pair one of two ways:
/// - [`is_excluded`](Self::is_excluded): matched by an exclude pattern and
///   not re-admitted by an include pattern;
/// - [`selects`](Self::selects): includes narrow what is inspected (all when
///   empty), excludes remove from it.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    pub excludes: PatternList,
    pub includes: PatternList,
}

impl ArtifactFilter {
    pub fn compile<S: AsRef<str>>(excludes: &[S], includes: &[S]) -> Result<Self, EnforcerError> {
        Ok(Self {
            excludes: PatternList::compile(excludes)?,
            includes: PatternList::compile(includes)?,
        })
    }

    pub fn is_excluded(&self, coord: &ArtifactCoordinate) -> bool {
        self.excludes.matches(coord) && !self.includes.matches(coord)
    }

    pub fn selects(&self, coord: &ArtifactCoordinate) -> bool {
        (self.includes.is_empty() || self.includes.matches(coord)) && !self.excludes.matches(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(g: &str, a: &str, v: &str) -> ArtifactCoordinate {
        ArtifactCoordinate::new(g, a, v)
    }

    #[test]
    fn empty_pattern_never_matches() {
        let p = ArtifactPattern::compile("   ").unwrap();
        assert!(p.is_empty());
        assert!(!p.matches(&coord("g", "a", "1.0")));
    }

    #[test]
    fn segments_are_trimmed() {
        let p = ArtifactPattern::compile(" org.a : lib ").unwrap();
        assert!(p.matches(&coord("org.a", "lib", "1.0")));
    }

    #[test]
    fn glob_segment() {
        let p = ArtifactPattern::compile("org.apache.*").unwrap();
        assert!(p.matches(&coord("org.apache.commons", "x", "1")));
        assert!(!p.matches(&coord("org.apachex", "x", "1")));
    }

    #[test]
    fn version_glob() {
        let p = ArtifactPattern::compile("g:a:1.*").unwrap();
        assert!(p.matches(&coord("g", "a", "1.4")));
        assert!(!p.matches(&coord("g", "a", "2.0")));
    }

    #[test]
    fn at_least_mode_treats_bare_version_as_ceiling() {
        let p = ArtifactPattern::compile_with("g:a:2.0", VersionMatch::AtLeast).unwrap();
        assert!(p.matches(&coord("g", "a", "1.0")));
        assert!(!p.matches(&coord("g", "a", "3.0")));
    }

    #[test]
    fn too_many_segments() {
        let err = ArtifactPattern::compile("a:b:c:d:e:f:g").unwrap_err();
        assert!(matches!(err, EnforcerError::InvalidPattern { .. }));
    }

    #[test]
    fn scope_defaults_to_compile() {
        let p = ArtifactPattern::compile("*:*:*:*:compile").unwrap();
        assert!(p.matches(&coord("g", "a", "1")));
        assert!(!p.matches(&coord("g", "a", "1").with_scope("test")));
    }
}
