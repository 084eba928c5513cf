use owo_colors::OwoColorize;
use serde_json::Value;
use std::fmt;

use super::jobs::style_state;
use super::timeline::RecordLine;
use crate::presentation::DisplayOptions;
use crate::presentation::formatters::text::join_list;
use crate::presentation::view_models::JobDetailViewModel;

pub struct JobDetailView<'a> {
    data: &'a JobDetailViewModel,
    options: DisplayOptions,
}

impl<'a> JobDetailView<'a> {
    pub fn new(data: &'a JobDetailViewModel, options: DisplayOptions) -> Self {
        Self { data, options }
    }

    fn field(&self, f: &mut fmt::Formatter, name: &str, value: &str) -> fmt::Result {
        if value.is_empty() {
            return Ok(());
        }
        let label = format!("{:<10}", name);
        if self.options.enable_color {
            writeln!(f, "{} {}", label.bold(), value)
        } else {
            writeln!(f, "{} {}", label, value)
        }
    }
}

impl fmt::Display for JobDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        let summary = &data.summary;

        writeln!(
            f,
            "Job {} ({}) {}",
            summary.id,
            summary.rule,
            style_state(summary.state, self.options.enable_color).trim_end()
        )?;
        self.field(f, "started", &summary.started)?;
        self.field(f, "duration", &summary.duration)?;
        self.field(f, "threads", &data.threads.to_string())?;
        self.field(f, "input", &join_list(data.input.as_deref()))?;
        self.field(f, "output", &join_list(data.output.as_deref()))?;
        self.field(f, "log", &join_list(data.log.as_deref()))?;

        let wildcards = data
            .wildcards
            .iter()
            .flatten()
            .map(|(name, value)| match value {
                Value::String(text) => format!("{}={}", name, text),
                other => format!("{}={}", name, other),
            })
            .collect::<Vec<_>>()
            .join(", ");
        self.field(f, "wildcards", &wildcards)?;
        self.field(f, "reason", data.reason.as_deref().unwrap_or(""))?;

        if let Some(shellcmd) = &data.shellcmd {
            writeln!(f, "shellcmd")?;
            for line in shellcmd.trim().lines() {
                writeln!(f, "    {}", line)?;
            }
        }

        writeln!(f, "\nRecords")?;
        for row in &data.records {
            write!(f, "{}", RecordLine::new(row, self.options))?;
        }
        Ok(())
    }
}
