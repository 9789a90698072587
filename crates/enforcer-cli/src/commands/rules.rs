//! Handler for `enforcer rules`.

use std::path::Path;

use miette::Result;

use enforcer_core::config::RuleLevel;
use enforcer_rules::runner::Enforcer;

pub fn exec(config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path)?;
    let enforcer = Enforcer::from_config(&config)?;

    if enforcer.is_empty() {
        println!("No rules configured.");
        return Ok(());
    }

    for rule in enforcer.rules() {
        let level = match rule.level() {
            RuleLevel::Error => "error",
            RuleLevel::Warn => "warn",
        };
        let id = rule.cache_id();
        println!("{:<30} {level:<5} {}", rule.name(), &id[..12.min(id.len())]);
    }
    if !enforcer.fails_on_error() {
        println!("(fail = false: errors are reported but do not fail the check)");
    }
    Ok(())
}
