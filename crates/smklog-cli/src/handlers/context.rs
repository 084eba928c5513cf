use crate::presentation::DisplayOptions;
use crate::types::OutputFormat;
use anyhow::Result;
use is_terminal::IsTerminal;
use serde::Serialize;
use smklog_engine::RunStatus;
use smklog_runtime::load_run_partial;
use std::fmt::Display;
use std::path::Path;

/// Context for handler execution with consistent presentation utilities
pub struct HandlerContext {
    pub format: OutputFormat,
    pub options: DisplayOptions,
}

impl HandlerContext {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            options: DisplayOptions {
                enable_color: std::io::stdout().is_terminal(),
            },
        }
    }

    /// Load a run, warning about and keeping whatever was read before a failure.
    pub fn load(&self, path: &Path) -> Result<RunStatus> {
        let load = load_run_partial(path);
        if let Some(err) = load.error {
            if load.run.logs.is_empty() {
                anyhow::bail!("Failed to read {}: {}", path.display(), err);
            }
            tracing::warn!(
                "showing the first {} records of {}: {}",
                load.run.logs.len(),
                path.display(),
                err
            );
        }
        Ok(load.run)
    }

    /// Print the JSON model, or its plain view.
    pub fn render<T, V>(&self, model: &T, view: V) -> Result<()>
    where
        T: Serialize,
        V: Display,
    {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(model)?),
            OutputFormat::Plain => print!("{}", view),
        }
        Ok(())
    }
}
