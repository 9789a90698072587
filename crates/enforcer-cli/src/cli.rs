//! CLI argument definitions for Enforcer.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "enforcer",
    version,
    about = "Dependency policy checks for resolved dependency graphs",
    long_about = "Enforcer checks a resolved dependency tree against configurable policies: \
                  version convergence, upper-bound resolution, transitive-dependency and \
                  dynamic-version bans, and banned artifacts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a dependency graph against the configured rules
    Check {
        /// Graph snapshot (JSON, or TOML with a .toml extension)
        #[arg(short, long)]
        graph: PathBuf,
        /// Rule configuration [default: ./Enforcer.toml]
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a dependency graph as a tree
    Tree {
        /// Graph snapshot (JSON, or TOML with a .toml extension)
        #[arg(short, long)]
        graph: PathBuf,
        /// Maximum depth
        #[arg(long)]
        depth: Option<usize>,
    },

    /// List the configured rules
    Rules {
        /// Rule configuration [default: ./Enforcer.toml]
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Parse command-line arguments.
pub fn parse() -> Cli {
    Cli::parse()
}
