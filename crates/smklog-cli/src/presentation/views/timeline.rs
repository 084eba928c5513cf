use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::DisplayOptions;
use crate::presentation::formatters::level::{level_marker, style_for_level};
use crate::presentation::formatters::text::first_line;
use crate::presentation::view_models::{RecordRow, TimelineViewModel};

/// One line of the timeline: elapsed time, level, event, message.
pub struct RecordLine<'a> {
    row: &'a RecordRow,
    options: DisplayOptions,
}

impl<'a> RecordLine<'a> {
    pub fn new(row: &'a RecordRow, options: DisplayOptions) -> Self {
        Self { row, options }
    }
}

impl fmt::Display for RecordLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let row = self.row;
        let event = format!("{:<15}", row.event.unwrap_or("-"));
        let event = if self.options.enable_color && row.event.is_some() {
            format!("{}", event.cyan())
        } else {
            event
        };
        let mut message = row.message.as_deref().map(first_line).unwrap_or_default();
        if message.is_empty() && !row.jobs.is_empty() {
            let ids: Vec<String> = row.jobs.iter().map(i64::to_string).collect();
            message = format!("jobs {}", ids.join(","));
        }

        writeln!(
            f,
            "{:>8} {} {} {}",
            row.elapsed,
            style_for_level(level_marker(row.levelno), row.levelno, self.options.enable_color),
            event,
            style_for_level(&message, row.levelno, self.options.enable_color),
        )
    }
}

pub struct TimelineView<'a> {
    data: &'a TimelineViewModel,
    options: DisplayOptions,
}

impl<'a> TimelineView<'a> {
    pub fn new(data: &'a TimelineViewModel, options: DisplayOptions) -> Self {
        Self { data, options }
    }
}

impl fmt::Display for TimelineView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(id) = &self.data.workflow_id {
            writeln!(f, "Workflow {}", id)?;
        }
        if let Some(started) = &self.data.started {
            writeln!(f, "Started  {}", started)?;
        }
        if self.data.workflow_id.is_some() || self.data.started.is_some() {
            writeln!(f)?;
        }

        if self.data.records.is_empty() {
            writeln!(f, "No records.")?;
            return Ok(());
        }
        for row in &self.data.records {
            write!(f, "{}", RecordLine::new(row, self.options))?;
        }
        if !self.data.finished {
            writeln!(f, "\n(run did not finish logging)")?;
        }
        Ok(())
    }
}
