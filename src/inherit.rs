//! Selecting which parent fields a new child ticket inherits.

use std::collections::BTreeMap;

use crate::types::InheritableFieldSet;

/// Copy the fields named in `names` from the parent's field values.
///
/// Names the parent does not have are skipped. Empty values are kept so the
/// child explicitly starts with the same (empty) value.
pub fn select_inherited(
    parent_fields: &BTreeMap<String, String>,
    names: &[String],
) -> InheritableFieldSet {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter_map(|name| {
            parent_fields
                .get(name)
                .map(|value| (name.to_string(), value.clone()))
        })
        .collect()
}
