//! Maven version parsing and comparison.
//!
//! Maven versions use a custom ordering that differs from semver:
//! - Segments are split on `.`, `-` and digit/letter transitions
//! - Numeric segments compare as numbers
//! - String qualifiers have a special ordering:
//!   `alpha` < `beta` < `milestone` < `rc` < `snapshot` < `""` (release) < `sp`
//! - SNAPSHOT versions sort before their release equivalent
//! - Trailing zeros and release qualifiers are dropped, so `1`, `1.0.0`
//!   and `1.0-ga` are equal
//!
//! Alongside the comparable segments, a [`Version`] exposes the classic
//! `major.minor.incremental-qualifier-build` breakdown.

use std::cmp::Ordering;
use std::fmt;

const SNAPSHOT: &str = "SNAPSHOT";

/// A parsed Maven version with comparable segments.
#[derive(Debug, Clone)]
pub struct Version {
    pub original: String,
    segments: Vec<Segment>,
    parts: VersionParts,
}

/// The `major.minor.incremental-qualifier-build` view of a version.
///
/// Versions that do not fit the pattern keep every numeric field empty and
/// carry the whole string as the qualifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionParts {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub incremental: Option<u64>,
    pub qualifier: Option<String>,
    pub build_number: Option<u64>,
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

#[derive(Debug, Clone, Eq, PartialEq)]
enum Segment {
    Numeric(u64),
    Qualifier(QualifierKind),
    Text(String),
}

/// Well-known Maven qualifiers with defined ordering.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
enum QualifierKind {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl Version {
    /// Parse a version string. Never fails.
    pub fn parse(version: &str) -> Self {
        let version = version.trim();
        Self {
            original: version.to_string(),
            segments: parse_segments(version),
            parts: parse_parts(version),
        }
    }

    pub fn parts(&self) -> &VersionParts {
        &self.parts
    }

    /// `true` for `-SNAPSHOT` versions and timestamped snapshots
    /// (`1.0-20240101.120000-3`).
    pub fn is_snapshot(&self) -> bool {
        is_snapshot(&self.original)
    }

    /// The base version: a timestamped snapshot maps back to `X-SNAPSHOT`,
    /// anything else is returned unchanged.
    pub fn base_version(&self) -> String {
        base_version(&self.original)
    }
}

/// `true` if the raw version string names a snapshot.
pub fn is_snapshot(version: &str) -> bool {
    let suffixed = version
        .len()
        .checked_sub(SNAPSHOT.len())
        .and_then(|start| version.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(SNAPSHOT));
    suffixed || timestamp_prefix(version).is_some()
}

/// Collapse a timestamped snapshot version to its `-SNAPSHOT` form.
pub fn base_version(version: &str) -> String {
    match timestamp_prefix(version) {
        Some(prefix) => format!("{prefix}-{SNAPSHOT}"),
        None => version.to_string(),
    }
}

/// For `X-YYYYMMDD.HHMMSS-N`, return `X`.
fn timestamp_prefix(version: &str) -> Option<&str> {
    let (rest, build) = version.rsplit_once('-')?;
    if build.is_empty() || !build.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (prefix, stamp) = rest.rsplit_once('-')?;
    let bytes = stamp.as_bytes();
    let well_formed = bytes.len() == 15
        && bytes[8] == b'.'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 8 || b.is_ascii_digit());
    well_formed.then_some(prefix)
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let max_len = self.segments.len().max(other.segments.len());
        for i in 0..max_len {
            let a = self.segments.get(i);
            let b = other.segments.get(i);
            let ord = compare_segments(a, b);
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn compare_segments(a: Option<&Segment>, b: Option<&Segment>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(s), None) => compare_segment_to_empty(s),
        (None, Some(s)) => compare_segment_to_empty(s).reverse(),
        (Some(a), Some(b)) => compare_two_segments(a, b),
    }
}

/// Order of a segment against a missing one. Segments are normalized, so a
/// missing segment never has to stand in for `0` or a release qualifier.
fn compare_segment_to_empty(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(_) => Ordering::Greater,
        Segment::Qualifier(q) => q.cmp(&QualifierKind::Release),
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare_two_segments(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Qualifier(a), Segment::Qualifier(b)) => a.cmp(b),
        (Segment::Numeric(_), Segment::Qualifier(_)) => Ordering::Greater,
        (Segment::Qualifier(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Numeric(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
        (Segment::Qualifier(q), Segment::Text(_)) => {
            if *q >= QualifierKind::Release {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Segment::Text(_), Segment::Qualifier(q)) => {
            if *q >= QualifierKind::Release {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn parse_segments(version: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current = String::new();

    for ch in version.chars() {
        if ch == '.' || ch == '-' {
            if !current.is_empty() {
                push_segment(&mut segments, classify(&current));
                current.clear();
            }
            continue;
        }
        // `1alpha2` splits into `1`, `alpha`, `2`
        let switches_kind = current
            .chars()
            .last()
            .is_some_and(|last| last.is_ascii_digit() != ch.is_ascii_digit());
        if switches_kind {
            push_segment(&mut segments, classify(&current));
            current.clear();
        }
        current.push(ch);
    }
    if !current.is_empty() {
        push_segment(&mut segments, classify(&current));
    }
    trim_zeros(&mut segments);

    segments
}

/// Append a segment in normalized form: zeros before a qualifier are
/// dropped (`1.0-sp` is `1-sp`) and release qualifiers (`ga`, `final`)
/// vanish entirely.
fn push_segment(segments: &mut Vec<Segment>, segment: Segment) {
    match segment {
        Segment::Numeric(_) => segments.push(segment),
        Segment::Qualifier(QualifierKind::Release) => trim_zeros(segments),
        _ => {
            trim_zeros(segments);
            segments.push(segment);
        }
    }
}

fn trim_zeros(segments: &mut Vec<Segment>) {
    while segments.last() == Some(&Segment::Numeric(0)) {
        segments.pop();
    }
}

fn classify(token: &str) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    let lower = token.to_lowercase();
    match lower.as_str() {
        "alpha" | "a" => Segment::Qualifier(QualifierKind::Alpha),
        "beta" | "b" => Segment::Qualifier(QualifierKind::Beta),
        "milestone" | "m" => Segment::Qualifier(QualifierKind::Milestone),
        "rc" | "cr" => Segment::Qualifier(QualifierKind::Rc),
        "snapshot" => Segment::Qualifier(QualifierKind::Snapshot),
        "ga" | "final" | "release" => Segment::Qualifier(QualifierKind::Release),
        "sp" => Segment::Qualifier(QualifierKind::Sp),
        _ => Segment::Text(lower),
    }
}

fn parse_parts(version: &str) -> VersionParts {
    let fallback = || VersionParts {
        qualifier: Some(version.to_string()),
        ..VersionParts::default()
    };

    let (head, tail) = match version.split_once('-') {
        Some((head, tail)) => (head, Some(tail)),
        None => (version, None),
    };

    let mut parts = VersionParts::default();
    if let Some(tail) = tail {
        let all_digits = !tail.is_empty() && tail.bytes().all(|b| b.is_ascii_digit());
        if all_digits && (tail.len() == 1 || !tail.starts_with('0')) {
            match tail.parse() {
                Ok(n) => parts.build_number = Some(n),
                Err(_) => parts.qualifier = Some(tail.to_string()),
            }
        } else {
            parts.qualifier = Some(tail.to_string());
        }
    }

    let tokens: Vec<&str> = head.split('.').collect();
    if tokens.len() > 3 {
        return fallback();
    }
    let mut numbers = Vec::with_capacity(3);
    for token in tokens {
        let leading_zero = token.len() > 1 && token.starts_with('0');
        match token.parse::<u64>() {
            Ok(n) if !leading_zero && token.bytes().all(|b| b.is_ascii_digit()) => numbers.push(n),
            _ => return fallback(),
        }
    }
    parts.major = numbers.first().copied();
    parts.minor = numbers.get(1).copied();
    parts.incremental = numbers.get(2).copied();
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_ordering() {
        let v1 = Version::parse("1.0");
        let v2 = Version::parse("2.0");
        assert!(v1 < v2);
    }

    #[test]
    fn three_part_ordering() {
        let v1 = Version::parse("1.0.0");
        let v2 = Version::parse("1.0.1");
        let v3 = Version::parse("1.1.0");
        assert!(v1 < v2);
        assert!(v2 < v3);
    }

    #[test]
    fn numeric_not_lexicographic() {
        assert!(Version::parse("1.9") < Version::parse("1.10"));
    }

    #[test]
    fn qualifier_ordering() {
        let alpha = Version::parse("1.0-alpha");
        let beta = Version::parse("1.0-beta");
        let rc = Version::parse("1.0-rc");
        let release = Version::parse("1.0");
        let sp = Version::parse("1.0-sp");

        assert!(alpha < beta);
        assert!(beta < rc);
        assert!(rc < release);
        assert!(release < sp);
    }

    #[test]
    fn letter_digit_transition_splits() {
        assert!(Version::parse("1.0alpha1") < Version::parse("1.0alpha2"));
        assert_eq!(Version::parse("1.0alpha1"), Version::parse("1.0-alpha-1"));
    }

    #[test]
    fn snapshot_before_release() {
        let snap = Version::parse("1.0-SNAPSHOT");
        let rel = Version::parse("1.0");
        assert!(snap < rel);
    }

    #[test]
    fn trailing_zeros_equal() {
        assert_eq!(Version::parse("1.0"), Version::parse("1.0.0"));
    }

    #[test]
    fn numeric_vs_text() {
        let v1 = Version::parse("1.0.0");
        let v2 = Version::parse("1.0.0-jre");
        assert!(v1 > v2);
    }

    #[test]
    fn parts_of_full_version() {
        let v = Version::parse("1.2.3-beta-4");
        let p = v.parts();
        assert_eq!(p.major, Some(1));
        assert_eq!(p.minor, Some(2));
        assert_eq!(p.incremental, Some(3));
        assert_eq!(p.qualifier.as_deref(), Some("beta-4"));
        assert_eq!(p.build_number, None);
    }

    #[test]
    fn parts_with_build_number() {
        let p = Version::parse("2.5-7").parts().clone();
        assert_eq!(p.major, Some(2));
        assert_eq!(p.minor, Some(5));
        assert_eq!(p.build_number, Some(7));
        assert_eq!(p.qualifier, None);
    }

    #[test]
    fn unparsable_folds_into_qualifier() {
        let p = Version::parse("1.2.3.4").parts().clone();
        assert_eq!(p.major, None);
        assert_eq!(p.qualifier.as_deref(), Some("1.2.3.4"));

        let p = Version::parse("abc").parts().clone();
        assert_eq!(p.qualifier.as_deref(), Some("abc"));
    }

    #[test]
    fn timestamp_snapshot_detection() {
        let v = Version::parse("1.0-20240115.093000-12");
        assert!(v.is_snapshot());
        assert_eq!(v.base_version(), "1.0-SNAPSHOT");

        let plain = Version::parse("1.0-SNAPSHOT");
        assert!(plain.is_snapshot());
        assert_eq!(plain.base_version(), "1.0-SNAPSHOT");

        let release = Version::parse("1.0.0");
        assert!(!release.is_snapshot());
        assert_eq!(release.base_version(), "1.0.0");
    }

    #[test]
    fn malformed_timestamp_is_not_snapshot() {
        assert!(!is_snapshot("1.0-2024011.093000-1"));
        assert!(!is_snapshot("1.0-20240115-093000-1"));
    }

    #[test]
    fn zeros_and_release_qualifiers_normalize_away() {
        assert_eq!(Version::parse("1"), Version::parse("1.0.0"));
        assert_eq!(Version::parse("1.0"), Version::parse("1.0-ga"));
        assert_eq!(Version::parse("1.0.0"), Version::parse("1-final"));
        assert_eq!(Version::parse("1.0-jre"), Version::parse("1.0.0-jre"));
        assert!(Version::parse("1.0-sp") > Version::parse("1.0.0"));
        assert!(Version::parse("1.0.1") > Version::parse("1.0-sp"));
    }

    #[test]
    fn ordering_is_total_over_mixed_versions() {
        let versions: Vec<Version> = [
            "1.0", "1.0.0", "1.0-ga", "1.0-sp", "1.0-jre", "1.0.0-jre", "1", "1.0.1",
            "1.0-SNAPSHOT", "1.0-alpha-1", "1.0-rc1", "1-final", "0.9", "1.0.0.0-sp1",
        ]
        .iter()
        .map(|s| Version::parse(s))
        .collect();

        for a in &versions {
            for b in &versions {
                assert_eq!(a.cmp(b), b.cmp(a).reverse(), "{a} vs {b}");
                for c in &versions {
                    if a <= b && b <= c {
                        assert!(a <= c, "{a} <= {b} <= {c}");
                    }
                    if a == b {
                        assert_eq!(a.cmp(c), b.cmp(c), "{a} == {b} against {c}");
                    }
                }
            }
        }
    }

    #[test]
    fn display() {
        let v = Version::parse("1.8.0");
        assert_eq!(v.to_string(), "1.8.0");
    }
}
