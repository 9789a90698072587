//! Handler for `enforcer check`.

use std::path::Path;

use miette::Result;

use enforcer_core::config::RuleLevel;
use enforcer_core::graph::DependencyGraph;
use enforcer_core::snapshot::NodeSnapshot;
use enforcer_rules::cache::ResultCache;
use enforcer_rules::runner::Enforcer;
use enforcer_util::progress;

pub fn exec(graph_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let enforcer = Enforcer::from_config(&config)?;

    let snapshot = NodeSnapshot::from_path(graph_path)?;
    let graph = DependencyGraph::from_snapshot(&snapshot)?;
    let root = &graph.node(graph.root()).coordinate;

    if enforcer.is_empty() {
        progress::status_warn("Skipping", "no rules configured");
        return Ok(());
    }

    progress::status(
        "Checking",
        &format!("{root} ({} dependencies)", graph.len().saturating_sub(1)),
    );

    let mut cache = ResultCache::new();
    let summary = enforcer.run(&graph, &mut cache);
    let fail = enforcer.fails_on_error();

    for outcome in &summary.outcomes {
        if outcome.passed() {
            progress::status("Passed", &outcome.rule);
            continue;
        }
        match outcome.level {
            RuleLevel::Warn => progress::status_warn("Warning", &outcome.rule),
            RuleLevel::Error => progress::status_error("Failed", &outcome.rule),
        }
        // Failing ERROR-level rules are reported through the returned error
        if !outcome.is_error() || !fail {
            println!("{}", outcome.message.trim_end());
        }
    }

    summary.check(fail)?;
    progress::status("Finished", &format!("{} rule(s) checked", summary.outcomes.len()));
    Ok(())
}
