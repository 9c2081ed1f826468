#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Helper struct to run subtickets commands in an isolated temp directory
pub struct SubticketsTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl SubticketsTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        SubticketsTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_subtickets").to_string(),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .current_dir(self.temp_dir.path())
            .env_remove("SUBTICKETS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute subtickets command")
    }

    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn subtickets command");
        child
            .stdin
            .take()
            .expect("stdin should be piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child
            .wait_with_output()
            .expect("Failed to wait for subtickets command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    /// Write a file inside the temp directory and return its path
    pub fn write_file(&self, name: &str, content: &str) -> String {
        let path: PathBuf = self.temp_dir.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path.to_string_lossy().to_string()
    }

    pub fn write_config(&self, content: &str) {
        self.write_file("subtickets.yaml", content);
    }
}

/// Three-level listing used across tests
pub const SAMPLE_PAYLOAD: &str = r#"{
    "tickets": [
        {"id": 5, "summary": "root", "status": "open", "depth": 0, "owner": "alice"},
        {"id": 6, "summary": "child", "status": "open", "depth": 1},
        {"id": 7, "summary": "grandchild", "status": "closed", "depth": 2, "type": "defect"}
    ],
    "columns": [
        {"key": "id", "label": "Ticket"},
        {"key": "summary", "label": "Summary"},
        {"key": "status", "label": "Status"}
    ],
    "affordance": {
        "mode": "form",
        "new_ticket_endpoint": "/trac/newticket",
        "inherited": {"component": "core", "milestone": "1.0"},
        "labels": {"button_or_link_text": "Create", "section_title_text": "Subtickets"}
    }
}"#;
