use owo_colors::OwoColorize;
use serde_json::Value;
use std::fmt;

use crate::presentation::DisplayOptions;
use crate::presentation::formatters::level::style_for_level;
use crate::presentation::view_models::RecordDetailViewModel;

pub struct RecordDetailView<'a> {
    data: &'a RecordDetailViewModel,
    options: DisplayOptions,
}

impl<'a> RecordDetailView<'a> {
    pub fn new(data: &'a RecordDetailViewModel, options: DisplayOptions) -> Self {
        Self { data, options }
    }

    fn label(&self, name: &str) -> String {
        let label = format!("{:<18}", name);
        if self.options.enable_color {
            format!("{}", label.bold())
        } else {
            label
        }
    }

    /// Strings print raw and multi-line text continues on indented lines.
    fn field(&self, f: &mut fmt::Formatter, name: &str, value: &Value) -> fmt::Result {
        let text = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let mut lines = text.lines();
        writeln!(f, "{} {}", self.label(name), lines.next().unwrap_or(""))?;
        for line in lines {
            writeln!(f, "{:19}{}", "", line)?;
        }
        Ok(())
    }
}

impl fmt::Display for RecordDetailView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        let row = &data.summary;

        write!(f, "Record {} ({})", row.index, data.kind)?;
        if !row.elapsed.is_empty() {
            write!(f, " at {}", row.elapsed)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "{} {}",
            self.label("level"),
            style_for_level(&row.levelname, row.levelno, self.options.enable_color)
        )?;
        if !row.jobs.is_empty() {
            let ids: Vec<String> = row.jobs.iter().map(i64::to_string).collect();
            writeln!(f, "{} {}", self.label("jobs"), ids.join(", "))?;
        }
        if let Some(message) = &row.message {
            self.field(f, "message", &Value::String(message.clone()))?;
        }
        if let Some(exc_info) = &data.exc_info {
            let text = format!("{}: {}", exc_info.type_name, exc_info.message);
            self.field(f, "exc_info", &Value::String(text))?;
        }
        for (name, value) in &data.fields {
            if !value.is_null() {
                self.field(f, name, value)?;
            }
        }
        Ok(())
    }
}
