//! Core data types for the dependency enforcer.
//!
//! This crate defines what the policies operate on: Maven versions and
//! version ranges, artifact coordinates, artifact patterns, the resolved
//! dependency tree and its serialized snapshot, and the `Enforcer.toml`
//! configuration.
//!
//! This crate is intentionally free of I/O beyond reading input files.

pub mod artifact;
pub mod config;
pub mod graph;
pub mod pattern;
pub mod range;
pub mod snapshot;
pub mod version;
