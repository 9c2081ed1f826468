//! The JSON payload a host hands over, and its validation into typed values.
//!
//! Nothing past this module sees untyped input. Shape problems become
//! `MalformedPayload`; an unrecognized affordance mode stays
//! `UnknownAffordanceMode` so it can be reported instead of swallowed.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, SubticketsError};
use crate::inherit::select_inherited;
use crate::links::{Endpoint, default_new_ticket_endpoint};
use crate::render::ParentSummary;
use crate::types::{
    AffordanceConfig, AffordanceLabels, AffordanceMode, ColumnSpec, InheritableFieldSet,
    TableOptions, TicketRecord, TicketSequence,
};

#[derive(Debug, Deserialize)]
struct RawPayload {
    tickets: Vec<TicketRecord>,
    #[serde(default)]
    columns: Option<ColumnSpec>,
    #[serde(default)]
    options: Option<TableOptions>,
    #[serde(default)]
    affordance: RawAffordance,
    #[serde(default)]
    parents: Option<ParentLinks>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAffordance {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    parent_id: Option<u64>,
    #[serde(default)]
    new_ticket_endpoint: Option<String>,
    #[serde(default)]
    inherited: Option<InheritableFieldSet>,
    #[serde(default)]
    parent_type: Option<String>,
    #[serde(default)]
    parent_fields: Option<BTreeMap<String, String>>,
    #[serde(default)]
    labels: AffordanceLabels,
}

/// The current ticket's own parents, shown as links above the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLinks {
    /// Raw `parents` field text, e.g. `"12, 3"`
    pub field: String,
    /// Status and summary for each referenced ticket the host could resolve
    #[serde(default)]
    pub tickets: Vec<ParentSummary>,
}

impl ParentLinks {
    pub fn lookup(&self, id: u64) -> Option<ParentSummary> {
        self.tickets.iter().find(|t| t.id == id).cloned()
    }
}

/// Validated payload, ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPayload {
    pub tickets: TicketSequence,
    pub columns: ColumnSpec,
    pub options: TableOptions,
    pub affordance: AffordanceRequest,
    pub parents: Option<ParentLinks>,
}

/// Affordance settings before the page supplies the ticket id.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordanceRequest {
    pub mode: AffordanceMode,
    pub parent_id: Option<u64>,
    pub new_ticket_endpoint: Option<Endpoint>,
    pub inherited: InheritableFieldSet,
    pub labels: AffordanceLabels,
}

impl AffordanceRequest {
    /// Complete the request for the ticket shown at `page_path`.
    ///
    /// The payload's parent id wins over the id taken from the path; the
    /// endpoint defaults to the `newticket` sibling of the ticket path.
    pub fn resolve(&self, page_path: &str, ticket_id: u64) -> Result<AffordanceConfig> {
        let new_ticket_endpoint = match &self.new_ticket_endpoint {
            Some(endpoint) => endpoint.clone(),
            None => default_new_ticket_endpoint(page_path).ok_or_else(|| {
                SubticketsError::MalformedPayload(format!(
                    "no new ticket endpoint given and none derivable from '{page_path}'"
                ))
            })?,
        };

        Ok(AffordanceConfig {
            mode: self.mode,
            parent_id: self.parent_id.unwrap_or(ticket_id),
            new_ticket_endpoint,
            inherited: self.inherited.clone(),
            labels: self.labels.clone(),
        })
    }
}

/// Parse and validate a payload using default configuration.
pub fn parse_payload(json: &str) -> Result<RenderPayload> {
    parse_payload_with(json, &Config::default())
}

/// Parse and validate a payload, filling unset parts from `config`.
pub fn parse_payload_with(json: &str, config: &Config) -> Result<RenderPayload> {
    let raw: RawPayload =
        serde_json::from_str(json).map_err(|e| SubticketsError::MalformedPayload(e.to_string()))?;

    let mode = match raw.affordance.mode.as_deref() {
        Some(mode) => mode.parse::<AffordanceMode>()?,
        None => config.affordance_mode()?,
    };

    validate_tickets(&raw.tickets)?;

    if raw.affordance.parent_id == Some(0) {
        return Err(SubticketsError::MalformedPayload(
            "parent_id must be positive".to_string(),
        ));
    }

    let parent_type = raw.affordance.parent_type.as_deref();

    let columns = match raw.columns {
        Some(columns) => columns,
        None => config.columns_for(parent_type),
    };
    columns.validate()?;

    let new_ticket_endpoint = raw
        .affordance
        .new_ticket_endpoint
        .as_deref()
        .map(Endpoint::parse)
        .transpose()
        .map_err(|e| SubticketsError::MalformedPayload(e.to_string()))?;

    let inherited = match (raw.affordance.inherited, &raw.affordance.parent_fields) {
        (Some(inherited), _) => inherited,
        (None, Some(fields)) => select_inherited(fields, config.child_inherits(parent_type)),
        (None, None) => InheritableFieldSet::new(),
    };

    Ok(RenderPayload {
        tickets: raw.tickets,
        columns,
        options: raw.options.unwrap_or_else(|| config.table_options()),
        affordance: AffordanceRequest {
            mode,
            parent_id: raw.affordance.parent_id,
            new_ticket_endpoint,
            inherited,
            labels: raw.affordance.labels,
        },
        parents: raw.parents,
    })
}

/// Ids must be positive and unique. Depth may grow by at most one level per
/// record, and the first record sits at depth 0 or 1.
fn validate_tickets(tickets: &[TicketRecord]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut deepest_allowed = 1;
    for ticket in tickets {
        if ticket.depth > deepest_allowed {
            return Err(SubticketsError::MalformedPayload(format!(
                "ticket #{} at depth {} skips levels (at most {} allowed here)",
                ticket.id, ticket.depth, deepest_allowed
            )));
        }
        deepest_allowed = ticket.depth + 1;
        if ticket.id == 0 {
            return Err(SubticketsError::MalformedPayload(
                "ticket ids must be positive".to_string(),
            ));
        }
        if !seen.insert(ticket.id) {
            return Err(SubticketsError::MalformedPayload(format!(
                "ticket #{} listed more than once",
                ticket.id
            )));
        }
    }
    Ok(())
}
