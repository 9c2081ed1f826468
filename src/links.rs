//! URL construction for ticket links and the new-ticket target.
//!
//! Ticket pages live at `.../ticket/<id>`. Links to other tickets swap the
//! trailing numeric segment; the new-ticket endpoint sits next to `ticket/`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, SubticketsError};

/// Query parameter that links a new ticket to its parent.
pub const PARENTS_PARAM: &str = "parents";

static TICKET_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/ticket/(\d+)").expect("ticket id regex should compile"));

static TRAILING_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/\d+/?$").expect("trailing id regex should compile"));

/// Base used to resolve host-relative endpoints such as `/trac/newticket`.
static RELATIVE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("base URL should parse"));

/// Extract the ticket id from a page path such as `/trac/ticket/42`.
///
/// Returns `None` when the path is not a ticket page or the id is zero.
pub fn extract_ticket_id(path: &str) -> Option<u64> {
    let captures = TICKET_ID_RE.captures(path)?;
    captures
        .get(1)?
        .as_str()
        .parse::<u64>()
        .ok()
        .filter(|id| *id > 0)
}

/// Link to ticket `id`, built by replacing the trailing numeric segment of
/// the current page path.
pub fn ticket_href(page_path: &str, id: u64) -> String {
    let base = TRAILING_ID_RE.replace(page_path, "");
    format!("{}/{}", base.trim_end_matches('/'), id)
}

/// Default new-ticket endpoint for a ticket page: the `ticket/<id>` part of
/// the path becomes `newticket`.
pub fn default_new_ticket_endpoint(page_path: &str) -> Option<Endpoint> {
    let m = TICKET_ID_RE.find(page_path)?;
    Endpoint::parse(&format!("{}/newticket", &page_path[..m.start()])).ok()
}

/// A new-ticket target. Absolute URLs are kept as given. Relative targets
/// (`/trac/newticket`, `newticket`, `//host/newticket`) keep their path text
/// exactly; only the query string is rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Endpoint {
    url: Url,
    /// Path part of a relative target, as written
    relative_path: Option<String>,
}

impl Endpoint {
    pub fn parse(raw: &str) -> Result<Self> {
        match Url::parse(raw) {
            Ok(url) => Ok(Self {
                url,
                relative_path: None,
            }),
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                let url = RELATIVE_BASE
                    .join(raw)
                    .map_err(|e| SubticketsError::InvalidUrl(raw.to_string(), e))?;
                let path_end = raw.find(['?', '#']).unwrap_or(raw.len());
                Ok(Self {
                    url,
                    relative_path: Some(raw[..path_end].to_string()),
                })
            }
            Err(e) => Err(SubticketsError::InvalidUrl(raw.to_string(), e)),
        }
    }

    pub fn href(&self) -> String {
        let Some(path) = &self.relative_path else {
            return self.url.to_string();
        };
        let mut href = path.clone();
        if let Some(query) = self.url.query() {
            href.push('?');
            href.push_str(query);
        }
        if let Some(fragment) = self.url.fragment() {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }

    /// Copy of this endpoint with `key=value` as the only value for `key`.
    pub fn with_query_param(&self, key: &str, value: &str) -> Self {
        let mut url = self.url.clone();
        let kept: Vec<(String, String)> = self
            .query_pairs()
            .into_iter()
            .filter(|(k, _)| k != key)
            .collect();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(key, value);
        Self {
            url,
            relative_path: self.relative_path.clone(),
        }
    }

    /// The new-ticket target with the parent reference embedded.
    pub fn with_parent(&self, parent_id: u64) -> Self {
        self.with_query_param(PARENTS_PARAM, &parent_id.to_string())
    }

    /// Copy of this endpoint with the query string removed.
    pub fn without_query(&self) -> Self {
        let mut url = self.url.clone();
        url.set_query(None);
        Self {
            url,
            relative_path: self.relative_path.clone(),
        }
    }

    /// Decoded query pairs in their original order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

impl TryFrom<String> for Endpoint {
    type Error = SubticketsError;

    fn try_from(raw: String) -> Result<Self> {
        Endpoint::parse(&raw)
    }
}

impl From<Endpoint> for String {
    fn from(endpoint: Endpoint) -> Self {
        endpoint.href()
    }
}

/// Substitute `{owner}` in an owner link template with the URL-encoded name.
pub fn owner_href(template: &str, owner: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(owner.as_bytes()).collect();
    template.replace("{owner}", &encoded)
}
