use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, OutputOptions, read_input};
use crate::config::Config;
use crate::error::Result;
use crate::payload::parse_payload_with;

/// Validate a payload and summarize what would be rendered
pub fn cmd_check(source: &str, config: &Config, output: OutputOptions) -> Result<()> {
    let content = read_input(source)?;
    let payload = parse_payload_with(&content, config)?;

    let max_depth = payload.tickets.iter().map(|t| t.depth).max();
    let columns: Vec<String> = payload.columns.keys().map(|k| k.to_string()).collect();
    let inherited: Vec<&str> = payload
        .affordance
        .inherited
        .keys()
        .map(String::as_str)
        .collect();

    let json_output = json!({
        "valid": true,
        "tickets": payload.tickets.len(),
        "max_depth": max_depth,
        "columns": columns,
        "mode": payload.affordance.mode.to_string(),
        "inherited": inherited,
        "depth_limit": payload.options.max_depth,
    });

    let mut text = format!("{}", "Payload OK".green().bold());
    text.push_str(&format!(
        "\n  {} {}",
        "Tickets:".dimmed(),
        payload.tickets.len()
    ));
    if let Some(depth) = max_depth {
        text.push_str(&format!(" (deepest level {depth})"));
    }
    text.push_str(&format!("\n  {} {}", "Columns:".dimmed(), columns.join(", ")));
    text.push_str(&format!(
        "\n  {} {}",
        "Mode:".dimmed(),
        payload.affordance.mode.cyan()
    ));
    if !inherited.is_empty() {
        text.push_str(&format!("\n  {} {}", "Inherited:".dimmed(), inherited.join(", ")));
    }

    CommandOutput::new(json_output).with_text(text).print(output)
}
