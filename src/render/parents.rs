use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::markup::Element;

static NUMBERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("numbers regex should compile"));

/// What the parent-links line needs to know about a referenced ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentSummary {
    pub id: u64,
    pub status: String,
    pub summary: String,
}

/// Ticket ids referenced by a free-text `parents` field, ascending and
/// without duplicates. Any run of digits counts as an id.
pub fn parse_parent_ids(field: &str) -> Vec<u64> {
    NUMBERS_RE
        .find_iter(field)
        .filter_map(|m| m.as_str().parse::<u64>().ok())
        .filter(|id| *id > 0)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Render the parents of a ticket as comma-separated links.
///
/// Ids the lookup cannot resolve are dropped, as are their separators.
pub fn render_parent_links(
    field: &str,
    lookup: &dyn Fn(u64) -> Option<ParentSummary>,
    link_builder: &dyn Fn(u64) -> String,
) -> Element {
    let mut span = Element::new("span").class("parents");
    let mut first = true;
    for parent in parse_parent_ids(field).into_iter().filter_map(lookup) {
        if !first {
            span.push(", ");
        }
        first = false;
        span.push(
            Element::new("a")
                .attr("href", link_builder(parent.id))
                .class(&format!("{} ticket", parent.status))
                .attr("title", parent.summary.as_str())
                .text(format!("#{}", parent.id)),
        );
    }
    span
}
