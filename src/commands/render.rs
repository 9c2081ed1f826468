use serde_json::json;

use super::{CommandOutput, OutputOptions, read_input};
use crate::assembly::{SkipReason, render_section};
use crate::config::Config;
use crate::error::{Result, SubticketsError};
use crate::payload::parse_payload_with;
use crate::types::{AffordanceMode, ColumnKey, ColumnSpec};

/// Command-line settings that take precedence over the payload
#[derive(Debug, Clone, Default)]
pub struct RenderOverrides {
    pub mode: Option<AffordanceMode>,
    pub columns: Option<Vec<ColumnKey>>,
    pub max_depth: Option<usize>,
}

/// Render the subtickets section for the ticket page at `page_path`
pub fn cmd_render(
    source: &str,
    page_path: &str,
    overrides: &RenderOverrides,
    config: &Config,
    output: OutputOptions,
) -> Result<()> {
    let content = read_input(source)?;

    let mut payload = match parse_payload_with(&content, config) {
        Ok(payload) => payload,
        Err(SubticketsError::MalformedPayload(detail)) => {
            tracing::warn!("ignoring malformed subtickets payload: {detail}");
            return skipped(SkipReason::MalformedPayload).print(output);
        }
        Err(e) => return Err(e),
    };

    if let Some(mode) = overrides.mode {
        payload.affordance.mode = mode;
    }
    if let Some(keys) = &overrides.columns {
        payload.columns = ColumnSpec::from_keys(keys);
        payload.columns.validate()?;
    }
    if overrides.max_depth.is_some() {
        payload.options.max_depth = overrides.max_depth;
    }

    match render_section(page_path, &payload)? {
        Some(section) => {
            let html = section.to_html();
            CommandOutput::new(json!({
                "status": "rendered",
                "rows": section.find_all_by_tag("tr").len().saturating_sub(1),
                "html": html,
            }))
            .with_text(html)
            .print(output)
        }
        None => {
            tracing::debug!("'{page_path}' is not a ticket page");
            skipped(SkipReason::MissingTicketId).print(output)
        }
    }
}

fn skipped(reason: SkipReason) -> CommandOutput {
    CommandOutput::new(json!({
        "status": "skipped",
        "reason": reason.to_string(),
    }))
}
