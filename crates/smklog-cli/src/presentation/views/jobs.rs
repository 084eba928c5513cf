use owo_colors::OwoColorize;
use smklog_engine::JobState;
use std::fmt;

use crate::presentation::DisplayOptions;
use crate::presentation::view_models::JobTableViewModel;

pub(crate) fn style_state(state: JobState, enable_color: bool) -> String {
    let text = format!("{:<8}", state.to_string());
    if !enable_color {
        return text;
    }
    match state {
        JobState::Failed => format!("{}", text.red().bold()),
        JobState::Finished => format!("{}", text.green()),
        JobState::Running => format!("{}", text.yellow()),
    }
}

pub struct JobTableView<'a> {
    data: &'a JobTableViewModel,
    options: DisplayOptions,
}

impl<'a> JobTableView<'a> {
    pub fn new(data: &'a JobTableViewModel, options: DisplayOptions) -> Self {
        Self { data, options }
    }
}

impl fmt::Display for JobTableView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.data.jobs.is_empty() {
            writeln!(f, "No jobs.")?;
        } else {
            let rule_width = self
                .data
                .jobs
                .iter()
                .map(|job| job.rule.len())
                .max()
                .unwrap_or(0)
                .max(4);

            let header = format!(
                "{:>6}  {:<rule_width$}  {:<8}  {:>8}  {:>8}",
                "ID", "RULE", "STATE", "STARTED", "DURATION"
            );
            if self.options.enable_color {
                writeln!(f, "{}", header.bold())?;
            } else {
                writeln!(f, "{}", header)?;
            }

            for job in &self.data.jobs {
                writeln!(
                    f,
                    "{:>6}  {:<rule_width$}  {}  {:>8}  {:>8}",
                    job.id,
                    job.rule,
                    style_state(job.state, self.options.enable_color),
                    job.started,
                    job.duration,
                )?;
            }
        }

        if !self.data.unknown_jobs.is_empty() {
            let ids: Vec<String> = self.data.unknown_jobs.iter().map(i64::to_string).collect();
            writeln!(f, "\nRecords for undescribed jobs: {}", ids.join(", "))?;
        }
        Ok(())
    }
}
