use chrono::Local;
use serde::{Deserialize, Serialize};
use smklog_format::Layout;
use smklog_types::{Clock, epoch_to_datetime};
use std::path::{Path, PathBuf};

use crate::Result;

/// Directory, relative to the working directory, that default log files go in.
pub const DEFAULT_LOG_DIR: &str = ".snakemake/log/json";

/// `file` value that selects standard error.
pub const STDERR_FILE: &str = "-";

/// Default log file for a run starting now: `<workdir>/.snakemake/log/json/<timestamp>.log`.
pub fn default_log_path(workdir: Option<&Path>, clock: &dyn Clock) -> PathBuf {
    let timestamp = epoch_to_datetime(clock.now())
        .with_timezone(&Local)
        .format("%Y-%m-%dT%H%M%S%.6f");
    let path = Path::new(DEFAULT_LOG_DIR).join(format!("{}.log", timestamp));
    match workdir {
        Some(workdir) => workdir.join(path),
        None => path,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HandlerSettings {
    /// File to write to, or `-` for stderr. A timestamped default path when unset.
    pub file: Option<PathBuf>,
    /// Write records in indented multi-line form
    pub multiline: bool,
    /// Ask the engine to emit the rule graph
    pub rulegraph: bool,
    /// Decode every record after encoding it and compare
    pub validate: bool,
}

impl HandlerSettings {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: HandlerSettings = toml::from_str(&content)?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::from_multiline(self.multiline)
    }

    pub fn writes_to_stderr(&self) -> bool {
        self.file
            .as_deref()
            .is_some_and(|file| file == Path::new(STDERR_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smklog_types::FixedClock;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = HandlerSettings::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(settings, HandlerSettings::default());
        assert_eq!(settings.layout(), Layout::SingleLine);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/smklog.toml");
        let settings = HandlerSettings {
            file: Some(PathBuf::from("run.log")),
            multiline: true,
            rulegraph: true,
            validate: false,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(HandlerSettings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("smklog.toml");
        std::fs::write(&path, "file = \"-\"\nmultiline = true\n").unwrap();
        let settings = HandlerSettings::load_from(&path).unwrap();
        assert!(settings.writes_to_stderr());
        assert!(settings.multiline);
        assert!(!settings.validate);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("smklog.toml");
        std::fs::write(&path, "multiline = \"very\"\n").unwrap();
        let err = HandlerSettings::load_from(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_default_log_path_shape() {
        let clock = FixedClock(1759974850.185749);
        let path = default_log_path(Some(Path::new("/work")), &clock);
        assert!(path.starts_with("/work/.snakemake/log/json"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with(".log"));
        assert!(!name.contains(':'));
        assert!(name.starts_with("2025-10-"));
    }
}
