//! config command - print the effective configuration

use super::CommandContext;
use anyhow::{Context, Result};
use dirscope_core::config::DirscopeConfig;

pub fn execute(ctx: &CommandContext) -> Result<()> {
    println!("{}", render(ctx)?);
    Ok(())
}

fn render(ctx: &CommandContext) -> Result<String> {
    let shown = DirscopeConfig {
        ldap: ctx.config.ldap.redacted(),
        logging: ctx.config.logging.clone(),
    };

    if ctx.is_json() {
        serde_json::to_string_pretty(&shown).context("Failed to serialize config")
    } else {
        toml::to_string_pretty(&shown).context("Failed to serialize config")
    }
}
