use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubticketsError};
use crate::links::Endpoint;

/// A related ticket as resolved by the host, annotated with its depth in the
/// listing.
///
/// `depth` is authoritative: nothing in this crate re-derives hierarchy from
/// the sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRecord {
    pub id: u64,

    pub summary: String,

    pub status: String,

    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    #[serde(default, alias = "level")]
    pub depth: usize,
}

impl TicketRecord {
    pub fn new(id: u64, summary: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            id,
            summary: summary.into(),
            status: status.into(),
            ticket_type: None,
            priority: None,
            owner: None,
            depth: 0,
        }
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_type(mut self, ticket_type: impl Into<String>) -> Self {
        self.ticket_type = Some(ticket_type.into());
        self
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Text shown in a plain cell for `key`. Absent values are empty.
    pub fn field_text(&self, key: ColumnKey) -> String {
        match key {
            ColumnKey::Id => format!("#{}", self.id),
            ColumnKey::Summary => self.summary.clone(),
            ColumnKey::Status => self.status.clone(),
            ColumnKey::Type => self.ticket_type.clone().unwrap_or_default(),
            ColumnKey::Priority => self.priority.clone().unwrap_or_default(),
            ColumnKey::Owner => self.owner.clone().unwrap_or_default(),
        }
    }
}

/// Ordered, depth-first listing of related tickets.
pub type TicketSequence = Vec<TicketRecord>;

/// Parent field values copied onto a newly created child, keyed by field name.
pub type InheritableFieldSet = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKey {
    Id,
    Summary,
    Status,
    Type,
    Priority,
    Owner,
}

enum_display_fromstr!(ColumnKey, SubticketsError::UnknownColumn, {
    Id => "id",
    Summary => "summary",
    Status => "status",
    Type => "type",
    Priority => "priority",
    Owner => "owner",
});

impl ColumnKey {
    pub const ALL: [ColumnKey; 6] = [
        ColumnKey::Id,
        ColumnKey::Summary,
        ColumnKey::Status,
        ColumnKey::Type,
        ColumnKey::Priority,
        ColumnKey::Owner,
    ];

    pub fn default_label(&self) -> &'static str {
        match self {
            ColumnKey::Id => "Ticket",
            ColumnKey::Summary => "Summary",
            ColumnKey::Status => "Status",
            ColumnKey::Type => "Type",
            ColumnKey::Priority => "Priority",
            ColumnKey::Owner => "Owner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: ColumnKey,
    pub label: String,
}

impl Column {
    pub fn new(key: ColumnKey, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }
}

impl From<ColumnKey> for Column {
    fn from(key: ColumnKey) -> Self {
        Column::new(key, key.default_label())
    }
}

/// Which columns render, in which order, under which header text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnSpec(Vec<Column>);

impl Default for ColumnSpec {
    fn default() -> Self {
        Self::from_keys(&ColumnKey::ALL)
    }
}

impl ColumnSpec {
    pub fn new(columns: Vec<Column>) -> Self {
        Self(columns)
    }

    /// Build a spec from keys alone, using the default label for each.
    pub fn from_keys(keys: &[ColumnKey]) -> Self {
        Self(keys.iter().copied().map(Column::from).collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = ColumnKey> + '_ {
        self.0.iter().map(|c| c.key)
    }

    /// Reject specs that name the same column twice.
    pub fn validate(&self) -> Result<()> {
        for (i, column) in self.0.iter().enumerate() {
            if self.0[..i].iter().any(|c| c.key == column.key) {
                return Err(SubticketsError::MalformedPayload(format!(
                    "column '{}' listed more than once",
                    column.key
                )));
            }
        }
        Ok(())
    }
}

/// How the "new child ticket" control is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AffordanceMode {
    /// Inline hyperlink carrying only the parent reference.
    Link,
    /// GET form carrying the parent reference plus every inherited field.
    #[default]
    Form,
}

enum_display!(AffordanceMode, {
    Link => "link",
    Form => "form",
});

impl std::str::FromStr for AffordanceMode {
    type Err = SubticketsError;

    /// `button` is accepted for form mode, matching the `add_style` option
    /// values hosts already use.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "link" => Ok(AffordanceMode::Link),
            "form" | "button" => Ok(AffordanceMode::Form),
            _ => Err(SubticketsError::UnknownAffordanceMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AffordanceLabels {
    pub button_or_link_text: String,
    pub section_title_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button_title: Option<String>,
}

impl Default for AffordanceLabels {
    fn default() -> Self {
        Self {
            button_or_link_text: "New subticket".to_string(),
            section_title_text: "Subtickets".to_string(),
            button_title: None,
        }
    }
}

/// Fully resolved input for the child-creation control.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordanceConfig {
    pub mode: AffordanceMode,
    pub parent_id: u64,
    pub new_ticket_endpoint: Endpoint,
    pub inherited: InheritableFieldSet,
    pub labels: AffordanceLabels,
}

/// Rendering knobs carried alongside the column spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Deepest level still listed; `None` lists every level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,

    /// Link target for owner cells; `{owner}` is replaced with the
    /// URL-encoded owner name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_url: Option<String>,
}
