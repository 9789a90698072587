//! Command dispatch and handler modules.

mod check;
mod rules;
mod tree;

use std::path::Path;

use miette::Result;

use enforcer_core::config::{EnforcerConfig, CONFIG_FILE};
use enforcer_util::errors::EnforcerError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check { graph, config } => check::exec(&graph, config.as_deref()),
        Command::Tree { graph, depth } => tree::exec(&graph, depth),
        Command::Rules { config } => rules::exec(config.as_deref()),
    }
}

/// Load an explicitly named config, or `Enforcer.toml` from the current
/// directory when there is one.
fn load_config(path: Option<&Path>) -> Result<EnforcerConfig> {
    let path = match path {
        Some(p) => {
            if !p.is_file() {
                return Err(EnforcerError::Config {
                    message: format!("{} not found", p.display()),
                }
                .into());
            }
            p.to_path_buf()
        }
        None => {
            let cwd = std::env::current_dir().map_err(EnforcerError::Io)?;
            cwd.join(CONFIG_FILE)
        }
    };
    tracing::debug!("loading configuration from {}", path.display());
    Ok(EnforcerConfig::load(&path)?)
}

