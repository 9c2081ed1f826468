#[macro_use]
mod macros;

pub mod assembly;
pub mod commands;
pub mod config;
pub mod error;
pub mod inherit;
pub mod links;
pub mod markup;
pub mod payload;
pub mod render;
pub mod types;

pub use assembly::{
    AssemblyOutcome, InsertionGuard, SkipReason, assemble, assemble_json, render_section,
};
pub use config::Config;
pub use error::{Result, SubticketsError};
pub use links::{Endpoint, extract_ticket_id, ticket_href};
pub use markup::{Document, Element, Node};
pub use payload::{AffordanceRequest, ParentLinks, RenderPayload, parse_payload, parse_payload_with};
pub use render::{ChildCreationAffordance, TreeTableRenderer, build_affordance, render_table};
pub use types::{
    AffordanceConfig, AffordanceLabels, AffordanceMode, Column, ColumnKey, ColumnSpec,
    InheritableFieldSet, TableOptions, TicketRecord, TicketSequence,
};
