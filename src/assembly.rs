//! Attaching the subtickets section to a ticket page.
//!
//! The section goes directly after the description block, once per page
//! load. Pages without a description block or without a ticket id in their
//! path are left alone.

use crate::config::Config;
use crate::error::{Result, SubticketsError};
use crate::links::{extract_ticket_id, ticket_href};
use crate::markup::{Document, Element};
use crate::payload::{RenderPayload, parse_payload_with};
use crate::render::{ChildCreationAffordance, TreeTableRenderer, render_parent_links};

pub const ANCHOR_CLASS: &str = "description";
pub const SECTION_CLASS: &str = "subtickets-section";

/// Remembers whether the section was already inserted during this page load.
#[derive(Debug, Default)]
pub struct InsertionGuard {
    inserted: bool,
}

impl InsertionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_inserted(&self) -> bool {
        self.inserted
    }

    fn mark_inserted(&mut self) {
        self.inserted = true;
    }
}

/// Why assembly left the page untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingAnchor,
    MissingTicketId,
    MalformedPayload,
    AlreadyInserted,
}

enum_display!(SkipReason, {
    MissingAnchor => "missing-anchor",
    MissingTicketId => "missing-ticket-id",
    MalformedPayload => "malformed-payload",
    AlreadyInserted => "already-inserted",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyOutcome {
    Inserted,
    Skipped(SkipReason),
}

/// Build the complete section for the ticket at `page_path`.
///
/// Returns `Ok(None)` when the path carries no ticket id.
pub fn render_section(page_path: &str, payload: &RenderPayload) -> Result<Option<Element>> {
    let Some(ticket_id) = extract_ticket_id(page_path) else {
        return Ok(None);
    };
    build_section(page_path, ticket_id, payload).map(Some)
}

fn build_section(page_path: &str, ticket_id: u64, payload: &RenderPayload) -> Result<Element> {
    let link_builder = |id: u64| ticket_href(page_path, id);
    let affordance = payload.affordance.resolve(page_path, ticket_id)?;

    let mut section = Element::new("div").class(SECTION_CLASS);

    if let Some(parents) = &payload.parents {
        let lookup = |id: u64| parents.lookup(id);
        let links = render_parent_links(&parents.field, &lookup, &link_builder);
        if links.child_elements().next().is_some() {
            section.push(Element::new("div").class("subtickets-parents").child(links));
        }
    }

    section.push(ChildCreationAffordance::build(&affordance));

    let table = TreeTableRenderer::new(&payload.columns, &link_builder)
        .with_options(payload.options.clone())
        .render(&payload.tickets);
    match table {
        Some(table) => section.push(table),
        None => tracing::debug!(ticket_id, "no subtickets to list, table omitted"),
    }

    Ok(section)
}

/// Insert the section after the page's description block.
///
/// Every no-op condition is reported as `Skipped`; only configuration
/// problems come back as errors, and in that case the document is untouched.
pub fn assemble(
    document: &mut Document,
    page_path: &str,
    payload: &RenderPayload,
    guard: &mut InsertionGuard,
) -> Result<AssemblyOutcome> {
    if let Some(reason) = precheck(document, page_path, guard) {
        return Ok(AssemblyOutcome::Skipped(reason));
    }
    let Some(ticket_id) = extract_ticket_id(page_path) else {
        return Ok(AssemblyOutcome::Skipped(SkipReason::MissingTicketId));
    };

    let section = build_section(page_path, ticket_id, payload)?;
    let inserted = document
        .root_mut()
        .insert_after(&is_anchor, section.into());
    if !inserted {
        return Ok(skipped(SkipReason::MissingAnchor));
    }

    guard.mark_inserted();
    tracing::debug!(ticket_id, rows = payload.tickets.len(), "inserted subtickets section");
    Ok(AssemblyOutcome::Inserted)
}

/// Parse `json` and assemble in one step.
///
/// A malformed payload is a silent skip; an unknown affordance mode is
/// still returned as an error.
pub fn assemble_json(
    document: &mut Document,
    page_path: &str,
    json: &str,
    config: &Config,
    guard: &mut InsertionGuard,
) -> Result<AssemblyOutcome> {
    if let Some(reason) = precheck(document, page_path, guard) {
        return Ok(AssemblyOutcome::Skipped(reason));
    }

    let payload = match parse_payload_with(json, config) {
        Ok(payload) => payload,
        Err(SubticketsError::MalformedPayload(detail)) => {
            tracing::warn!("ignoring malformed subtickets payload: {detail}");
            return Ok(AssemblyOutcome::Skipped(SkipReason::MalformedPayload));
        }
        Err(e) => return Err(e),
    };

    match assemble(document, page_path, &payload, guard) {
        Err(SubticketsError::MalformedPayload(detail)) => {
            tracing::warn!("ignoring malformed subtickets payload: {detail}");
            Ok(AssemblyOutcome::Skipped(SkipReason::MalformedPayload))
        }
        other => other,
    }
}

/// Checks shared by every entry point, cheapest first.
fn precheck(document: &Document, page_path: &str, guard: &mut InsertionGuard) -> Option<SkipReason> {
    if guard.is_inserted() {
        return Some(log_skip(SkipReason::AlreadyInserted));
    }
    if document.root().find(&is_anchor).is_none() {
        return Some(log_skip(SkipReason::MissingAnchor));
    }
    if document
        .root()
        .next_sibling_of(&is_anchor)
        .is_some_and(|el| el.has_class(SECTION_CLASS))
    {
        guard.mark_inserted();
        return Some(log_skip(SkipReason::AlreadyInserted));
    }
    if extract_ticket_id(page_path).is_none() {
        return Some(log_skip(SkipReason::MissingTicketId));
    }
    None
}

fn is_anchor(el: &Element) -> bool {
    el.has_class(ANCHOR_CLASS)
}

fn log_skip(reason: SkipReason) -> SkipReason {
    tracing::debug!(%reason, "subtickets section not inserted");
    reason
}

fn skipped(reason: SkipReason) -> AssemblyOutcome {
    AssemblyOutcome::Skipped(log_skip(reason))
}
