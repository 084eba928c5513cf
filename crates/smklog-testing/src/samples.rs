//! Log text rendering and on-disk sample placement.

use anyhow::Result;
use smklog_types::Record;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Render records as log text, pretty-printing the records whose index is
/// in `pretty` and writing the rest one per line.
pub fn render_log(records: &[Record], pretty: &[usize]) -> Result<String> {
    let mut text = String::new();
    for (i, record) in records.iter().enumerate() {
        if pretty.contains(&i) {
            text.push_str(&serde_json::to_string_pretty(record)?);
        } else {
            text.push_str(&serde_json::to_string(record)?);
        }
        text.push('\n');
    }
    Ok(text)
}

/// A log file inside a temporary directory that lives as long as this value.
pub struct SampleLog {
    _temp_dir: TempDir,
    path: PathBuf,
}

impl SampleLog {
    /// Write raw text as `run.log` in a fresh temp dir.
    pub fn from_text(text: &str) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("run.log");
        fs::write(&path, text)?;
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn from_records(records: &[Record], pretty: &[usize]) -> Result<Self> {
        Self::from_text(&render_log(records, pretty)?)
    }

    /// Copy one of the files under `samples/`.
    pub fn from_sample(name: &str) -> Result<Self> {
        let text = fs::read_to_string(sample_path(name))?;
        Self::from_text(&text)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self._temp_dir.path()
    }
}

/// Path of a checked-in sample file.
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}
