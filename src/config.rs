//! Rendering configuration.
//!
//! Configuration is read from `subtickets.yaml` in the working directory (or
//! the file named by `SUBTICKETS_CONFIG`) and includes:
//! - How the "new subticket" control is offered (`add_style`)
//! - How many levels of subtickets are listed (`recursion_depth`)
//! - An optional owner link template (`owner_url`)
//! - Per ticket type: inherited fields and table columns

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubticketsError};
use crate::types::{AffordanceMode, ColumnKey, ColumnSpec, TableOptions};

pub const CONFIG_FILE: &str = "subtickets.yaml";
pub const CONFIG_ENV: &str = "SUBTICKETS_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// `button`/`form` for a pre-filled form, `link` for a plain link
    #[serde(default = "default_add_style")]
    pub add_style: String,

    /// Deepest listed level; -1 lists every level, 0 only direct children
    #[serde(default = "default_recursion_depth")]
    pub recursion_depth: i64,

    /// Owner link template, `{owner}` is substituted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_url: Option<String>,

    /// Settings for ticket types without their own section
    #[serde(rename = "default", default)]
    pub defaults: TypeConfig,

    /// Per ticket type overrides, keyed by type name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub types: BTreeMap<String, TypeConfig>,
}

fn default_add_style() -> String {
    "button".to_string()
}

fn default_recursion_depth() -> i64 {
    -1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            add_style: default_add_style(),
            recursion_depth: default_recursion_depth(),
            owner_url: None,
            defaults: TypeConfig::default(),
            types: BTreeMap::new(),
        }
    }
}

/// Per ticket type settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeConfig {
    /// Parent fields copied into a new child ticket
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_inherits: Vec<String>,

    /// Columns listed after the ticket id and summary
    #[serde(default = "default_table_columns")]
    pub table_columns: Vec<ColumnKey>,
}

fn default_table_columns() -> Vec<ColumnKey> {
    vec![ColumnKey::Status, ColumnKey::Owner]
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            child_inherits: Vec::new(),
            table_columns: default_table_columns(),
        }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        match env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => PathBuf::from(path),
            _ => PathBuf::from(CONFIG_FILE),
        }
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            SubticketsError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.affordance_mode()?;
        if self.recursion_depth < -1 {
            return Err(SubticketsError::Config(format!(
                "recursion_depth must be -1 or greater, got {}",
                self.recursion_depth
            )));
        }
        Ok(())
    }

    pub fn affordance_mode(&self) -> Result<AffordanceMode> {
        self.add_style.parse()
    }

    pub fn max_depth(&self) -> Option<usize> {
        usize::try_from(self.recursion_depth).ok()
    }

    /// Settings for `ticket_type`, falling back to the `default` section.
    pub fn type_config(&self, ticket_type: Option<&str>) -> &TypeConfig {
        ticket_type
            .and_then(|t| self.types.get(t))
            .unwrap_or(&self.defaults)
    }

    pub fn child_inherits(&self, ticket_type: Option<&str>) -> &[String] {
        &self.type_config(ticket_type).child_inherits
    }

    /// Id and summary first, then the configured columns.
    pub fn columns_for(&self, ticket_type: Option<&str>) -> ColumnSpec {
        let mut keys = vec![ColumnKey::Id, ColumnKey::Summary];
        for key in &self.type_config(ticket_type).table_columns {
            if !keys.contains(key) {
                keys.push(*key);
            }
        }
        ColumnSpec::from_keys(&keys)
    }

    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            max_depth: self.max_depth(),
            owner_url: self.owner_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.affordance_mode().unwrap(), AffordanceMode::Form);
        assert_eq!(config.max_depth(), None);
        assert!(config.owner_url.is_none());
        assert!(config.types.is_empty());
    }

    #[test]
    fn test_config_from_empty_yaml_is_default() {
        let config = Config::from_yaml("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_full_yaml() {
        let yaml = r#"
add_style: link
recursion_depth: 0
owner_url: "/query?owner={owner}"
default:
  child_inherits: [component]
types:
  defect:
    child_inherits: [component, milestone]
    table_columns: [status, priority]
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.affordance_mode().unwrap(), AffordanceMode::Link);
        assert_eq!(config.max_depth(), Some(0));
        assert_eq!(config.child_inherits(Some("defect")).len(), 2);
        assert_eq!(config.child_inherits(Some("task")), ["component".to_string()]);
        assert_eq!(config.child_inherits(None), ["component".to_string()]);

        let keys: Vec<_> = config.columns_for(Some("defect")).keys().collect();
        assert_eq!(
            keys,
            vec![ColumnKey::Id, ColumnKey::Summary, ColumnKey::Status, ColumnKey::Priority]
        );
    }

    #[test]
    fn test_default_columns() {
        let keys: Vec<_> = Config::default().columns_for(None).keys().collect();
        assert_eq!(
            keys,
            vec![ColumnKey::Id, ColumnKey::Summary, ColumnKey::Status, ColumnKey::Owner]
        );
    }

    #[test]
    fn test_columns_are_not_duplicated() {
        let config = Config::from_yaml("default:\n  table_columns: [summary, owner, id]\n").unwrap();
        let keys: Vec<_> = config.columns_for(None).keys().collect();
        assert_eq!(keys, vec![ColumnKey::Id, ColumnKey::Summary, ColumnKey::Owner]);
    }

    #[test]
    fn test_unknown_add_style_is_rejected() {
        let err = Config::from_yaml("add_style: bogus\n").unwrap_err();
        assert!(matches!(err, SubticketsError::UnknownAffordanceMode(_)));
    }

    #[test]
    fn test_invalid_recursion_depth_is_rejected() {
        let err = Config::from_yaml("recursion_depth: -5\n").unwrap_err();
        assert!(matches!(err, SubticketsError::Config(_)));
    }

    #[test]
    fn test_unknown_column_is_yaml_error() {
        let err = Config::from_yaml("default:\n  table_columns: [milestone]\n").unwrap_err();
        assert!(matches!(err, SubticketsError::YamlParse(_)));
    }

    #[test]
    fn test_table_options() {
        let config = Config::from_yaml("recursion_depth: 2\nowner_url: \"/u/{owner}\"\n").unwrap();
        let options = config.table_options();
        assert_eq!(options.max_depth, Some(2));
        assert_eq!(options.owner_url.as_deref(), Some("/u/{owner}"));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "add_style: link\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.affordance_mode().unwrap(), AffordanceMode::Link);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut config = Config::default();
        config.owner_url = Some("/q?o={owner}".to_string());
        config.types.insert(
            "epic".to_string(),
            TypeConfig {
                child_inherits: vec!["milestone".to_string()],
                table_columns: vec![ColumnKey::Type],
            },
        );
        let yaml = serde_yaml_ng::to_string(&config).unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
