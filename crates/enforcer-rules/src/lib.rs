//! Dependency policy engine.
//!
//! Walks a resolved [`DependencyGraph`](enforcer_core::graph::DependencyGraph)
//! and decides, per node, whether it breaks one of the configured rules:
//! version convergence, upper-bound resolution, transitive-dependency ban,
//! dynamic-version ban, or banned artifacts. Every rule is a pure function of
//! the graph and its configuration.

pub mod banned;
pub mod cache;
pub mod conflict;
pub mod convergence;
pub mod dynamic_versions;
pub mod report;
pub mod rule;
pub mod runner;
pub mod transitive;
pub mod upper_bound;
pub mod visit;
