//! Command implementations behind the `subtickets` binary.
//!
//! Each command builds a JSON value and a text rendering and lets
//! [`CommandOutput`] pick one based on `--json`.

mod check;
mod config;
mod render;

pub use check::cmd_check;
pub use config::{cmd_config_path, cmd_config_show};
pub use render::{RenderOverrides, cmd_render};

use std::fs;
use std::io::{self, Read};

use serde_json::Value;

use crate::error::{Result, SubticketsError};

/// Output selection shared by every command
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

/// A command's result in both output formats
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn print(self, output: OutputOptions) -> Result<()> {
        if output.json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
        } else if let Some(text) = self.text
            && !text.is_empty()
        {
            println!("{text}");
        }
        Ok(())
    }
}

/// Read a payload from a file, or from stdin when `source` is `-`
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    fs::read_to_string(source).map_err(|e| {
        SubticketsError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read payload at {source}: {e}"),
        ))
    })
}
