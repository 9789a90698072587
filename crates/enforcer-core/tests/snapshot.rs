use std::io::Write;

use enforcer_core::graph::DependencyGraph;
use enforcer_core::snapshot::NodeSnapshot;
use enforcer_util::errors::EnforcerError;
use tempfile::NamedTempFile;

const GRAPH_JSON: &str = r#"{
  "group": "com.example", "artifact": "app", "version": "1.0",
  "children": [
    { "group": "org.a", "artifact": "a", "version": "1.0",
      "children": [
        { "group": "org.c", "artifact": "c", "version": "2.0",
          "constraint": "[1.0,3.0)", "premanaged-version": "1.5" }
      ] },
    { "group": "org.b", "artifact": "b", "version": "2.0", "scope": "test",
      "optional": true, "type": "pom", "classifier": "sources" }
  ]
}"#;

#[test]
fn builds_graph_from_json() {
    let snapshot = NodeSnapshot::from_json(GRAPH_JSON).unwrap();
    let graph = DependencyGraph::from_snapshot(&snapshot).unwrap();
    assert_eq!(graph.len(), 4);

    let root = graph.root();
    assert!(graph.node(root).coordinate.scope.is_none());

    let children = graph.children(root);
    assert_eq!(children.len(), 2);
    let a = graph.node(children[0]);
    assert_eq!(a.coordinate.artifact_id, "a");
    assert_eq!(a.coordinate.scope.as_deref(), Some("compile"));
    assert_eq!(a.constraint, "1.0");

    let b = graph.node(children[1]);
    assert!(b.optional);
    assert_eq!(b.coordinate.artifact_type, "pom");
    assert_eq!(b.coordinate.classifier.as_deref(), Some("sources"));
    assert_eq!(b.coordinate.scope.as_deref(), Some("test"));

    let c_idx = graph.children(children[0])[0];
    let c = graph.node(c_idx);
    assert_eq!(c.constraint, "[1.0,3.0)");
    assert_eq!(c.premanaged_version.as_deref(), Some("1.5"));
    assert_eq!(graph.depth(c_idx), 2);
}

#[test]
fn snapshot_roundtrip_keeps_fingerprint() {
    let snapshot = NodeSnapshot::from_json(GRAPH_JSON).unwrap();
    let graph = DependencyGraph::from_snapshot(&snapshot).unwrap();
    let rebuilt = DependencyGraph::from_snapshot(&graph.to_snapshot()).unwrap();
    assert_eq!(graph.fingerprint(), rebuilt.fingerprint());
    assert_eq!(graph.print_tree(None), rebuilt.print_tree(None));
}

#[test]
fn fingerprint_changes_with_versions() {
    let snapshot = NodeSnapshot::from_json(GRAPH_JSON).unwrap();
    let graph = DependencyGraph::from_snapshot(&snapshot).unwrap();

    let mut changed = snapshot.clone();
    changed.children[0].version = "1.1".to_string();
    let other = DependencyGraph::from_snapshot(&changed).unwrap();
    assert_ne!(graph.fingerprint(), other.fingerprint());
}

#[test]
fn missing_ids_are_rejected() {
    let err = NodeSnapshot::from_json(
        r#"{"group": "g", "artifact": "a", "version": "1",
            "children": [{"group": "", "artifact": "x", "version": "1"}]}"#,
    )
    .and_then(|s| DependencyGraph::from_snapshot(&s))
    .unwrap_err();
    assert!(matches!(err, EnforcerError::Graph { .. }));
}

#[test]
fn malformed_json_is_a_graph_error() {
    let err = NodeSnapshot::from_json("{ not json").unwrap_err();
    assert!(matches!(err, EnforcerError::Graph { .. }));
}

#[test]
fn reads_toml_snapshot_from_disk() {
    let mut tmp = NamedTempFile::with_suffix(".toml").unwrap();
    write!(
        tmp,
        r#"
group = "com.example"
artifact = "app"
version = "1.0"

[[children]]
group = "org.a"
artifact = "a"
version = "LATEST"
"#
    )
    .unwrap();
    tmp.flush().unwrap();

    let snapshot = NodeSnapshot::from_path(tmp.path()).unwrap();
    let graph = DependencyGraph::from_snapshot(&snapshot).unwrap();
    assert_eq!(graph.len(), 2);
    let a = graph.node(graph.children(graph.root())[0]);
    assert_eq!(a.constraint, "LATEST");
}

#[test]
fn reads_json_snapshot_from_disk() {
    let mut tmp = NamedTempFile::with_suffix(".json").unwrap();
    write!(tmp, "{}", GRAPH_JSON).unwrap();
    tmp.flush().unwrap();
    let snapshot = NodeSnapshot::from_path(tmp.path()).unwrap();
    assert_eq!(snapshot.children.len(), 2);
}

#[test]
fn missing_file_is_a_graph_error() {
    let err = NodeSnapshot::from_path(std::path::Path::new("/nonexistent/graph.json")).unwrap_err();
    assert!(matches!(err, EnforcerError::Graph { .. }));
}
