//! Configuration commands.
//!
//! - `config show`: Display the effective configuration
//! - `config path`: Print where configuration is read from

use serde_json::json;

use super::{CommandOutput, OutputOptions};
use crate::config::Config;
use crate::error::Result;

/// Show the effective configuration
pub fn cmd_config_show(config: &Config, output: OutputOptions) -> Result<()> {
    let json_output = serde_json::to_value(config)?;
    let text_output = serde_yaml_ng::to_string(config)?;

    CommandOutput::new(json_output)
        .with_text(text_output.trim_end())
        .print(output)
}

/// Show the path the configuration is loaded from
pub fn cmd_config_path(path: &std::path::Path, output: OutputOptions) -> Result<()> {
    CommandOutput::new(json!({
        "path": path.display().to_string(),
        "exists": path.exists(),
    }))
    .with_text(path.display().to_string())
    .print(output)
}
