//! CLI command implementations

pub mod config;
pub mod query;

use crate::OutputFormat;
use dirscope_core::config::DirscopeConfig;

/// Context passed to all commands
pub struct CommandContext {
    pub config: DirscopeConfig,
    pub output_format: OutputFormat,
}

impl CommandContext {
    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        matches!(self.output_format, OutputFormat::Json)
    }
}
