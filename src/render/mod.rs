//! Renderers for the subtickets section.
//!
//! Every function here is pure: it takes explicit inputs and returns markup
//! for the caller to attach.

pub mod affordance;
pub mod parents;
pub mod table;

pub use affordance::{ChildCreationAffordance, build_affordance};
pub use parents::{ParentSummary, parse_parent_ids, render_parent_links};
pub use table::{TreeTableRenderer, render_table};
