//! Shared utilities for the dependency enforcer.
//!
//! This crate provides cross-cutting concerns used by the other enforcer
//! crates: the unified error type, SHA-256 fingerprints for cache keys,
//! and Cargo-style terminal status lines.

pub mod errors;
pub mod hash;
pub mod progress;
