//! Handler for `enforcer tree`.

use std::path::Path;

use miette::Result;

use enforcer_core::graph::DependencyGraph;
use enforcer_core::snapshot::NodeSnapshot;

pub fn exec(graph_path: &Path, depth: Option<usize>) -> Result<()> {
    let snapshot = NodeSnapshot::from_path(graph_path)?;
    let graph = DependencyGraph::from_snapshot(&snapshot)?;
    print!("{}", graph.print_tree(depth));
    Ok(())
}
