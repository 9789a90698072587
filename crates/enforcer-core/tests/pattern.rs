use enforcer_core::artifact::ArtifactCoordinate;
use enforcer_core::pattern::{ArtifactFilter, ArtifactPattern, PatternList};
use enforcer_util::errors::EnforcerError;

fn coord(g: &str, a: &str, v: &str) -> ArtifactCoordinate {
    ArtifactCoordinate::new(g, a, v)
}

#[test]
fn wildcard_artifact_with_pinned_version() {
    let p = ArtifactPattern::compile("group:*:1.0").unwrap();
    assert!(p.matches(&coord("group", "artifactX", "1.0")));
    assert!(p.matches(&coord("group", "artifactY", "1.0")));
    assert!(!p.matches(&coord("group", "artifactX", "2.0")));
    assert!(!p.matches(&coord("other", "artifactX", "1.0")));
}

#[test]
fn group_only_pattern() {
    let p = ArtifactPattern::compile("org.slf4j").unwrap();
    assert!(p.matches(&coord("org.slf4j", "slf4j-api", "2.0.9")));
    assert!(!p.matches(&coord("org.slf4j.ext", "x", "1")));
}

#[test]
fn matching_is_case_sensitive() {
    let p = ArtifactPattern::compile("Org.Example:lib").unwrap();
    assert!(!p.matches(&coord("org.example", "lib", "1.0")));
}

#[test]
fn version_range_segment() {
    let p = ArtifactPattern::compile("g:a:[1.0,2.0)").unwrap();
    assert!(p.matches(&coord("g", "a", "1.0")));
    assert!(p.matches(&coord("g", "a", "1.9")));
    assert!(!p.matches(&coord("g", "a", "2.0")));
}

#[test]
fn type_scope_classifier_segments() {
    let p = ArtifactPattern::compile("g:a:*:test-jar:test:tests").unwrap();
    let hit = coord("g", "a", "1.0")
        .with_type("test-jar")
        .with_scope("test")
        .with_classifier("tests");
    assert!(p.matches(&hit));
    assert!(!p.matches(&coord("g", "a", "1.0").with_scope("test")));
}

#[test]
fn empty_segments_are_ignored() {
    let p = ArtifactPattern::compile("g::1.0").unwrap();
    assert!(p.matches(&coord("g", "anything", "1.0")));
}

#[test]
fn malformed_version_segment_propagates() {
    let err = ArtifactPattern::compile("g:a:[1.0,").unwrap_err();
    assert!(matches!(err, EnforcerError::InvalidRangeSpec { .. }));
    let err = PatternList::compile(&["ok:pattern", "g:a:(2.0,1.0)"]).unwrap_err();
    assert!(matches!(err, EnforcerError::InvalidRangeSpec { .. }));
}

#[test]
fn empty_pattern_in_list_never_matches() {
    let list = PatternList::compile(&["", "  "]).unwrap();
    assert!(list.is_empty());
    for c in [coord("g", "a", "1.0"), coord("", "", ""), coord("x", "y", "z")] {
        assert!(!list.matches(&c));
    }
}

#[test]
fn list_matches_any_member() {
    let list = PatternList::compile(&["", "org.a", "org.b:b"]).unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.matches(&coord("org.a", "x", "1")));
    assert!(list.matches(&coord("org.b", "b", "1")));
    assert!(!list.matches(&coord("org.b", "c", "1")));
    assert_eq!(
        list.find(&coord("org.b", "b", "1")).map(|p| p.as_str()),
        Some("org.b:b")
    );
}

#[test]
fn filter_exclusion_semantics() {
    let filter = ArtifactFilter::compile(&["org.apache.*"], &["org.apache.commons:commons-lang3"])
        .unwrap();
    assert!(filter.is_excluded(&coord("org.apache.httpcomponents", "httpclient", "4.5")));
    assert!(!filter.is_excluded(&coord("org.apache.commons", "commons-lang3", "3.12")));
    assert!(!filter.is_excluded(&coord("com.google", "guava", "32.0")));
}

#[test]
fn filter_selection_semantics() {
    let all = ArtifactFilter::default();
    assert!(all.selects(&coord("g", "a", "1")));

    let filter = ArtifactFilter::compile(&["org.a:skip"], &["org.a"]).unwrap();
    assert!(filter.selects(&coord("org.a", "keep", "1")));
    assert!(!filter.selects(&coord("org.a", "skip", "1")));
    assert!(!filter.selects(&coord("org.b", "keep", "1")));
}
