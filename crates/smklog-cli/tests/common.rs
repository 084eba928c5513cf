//! Shared fixture for CLI integration tests.
//!
//! Each integration test file compiles this module on its own, so not every
//! helper is used everywhere.
#![cfg(test)]
#![allow(dead_code)]

use assert_cmd::Command;
use smklog_testing::{render_log, sample_path};
use smklog_types::Record;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_WORKFLOW_ID: &str = "f0915278-1f9d-4cc8-a2b3-f23c3649c7e4";

pub struct TestFixture {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn write_log(&self, name: &str, text: &str) -> PathBuf {
        let path = self.root.join(name);
        fs::write(&path, text).expect("Failed to write log");
        path
    }

    pub fn write_records(&self, name: &str, records: &[Record], pretty: &[usize]) -> PathBuf {
        let text = render_log(records, pretty).expect("Failed to render records");
        self.write_log(name, &text)
    }

    /// Copy the recorded two-job workflow run into the fixture.
    pub fn sample_run(&self) -> PathBuf {
        let text = fs::read_to_string(sample_path("workflow_run.log"))
            .expect("Failed to read sample log");
        self.write_log("workflow_run.log", &text)
    }

    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("smklog");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Run a command with `--format json` and parse its stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(args)
            .arg("--format")
            .arg("json")
            .output()
            .expect("Failed to run smklog");
        assert!(
            output.status.success(),
            "smklog {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Failed to parse JSON output")
    }
}
