use owo_colors::OwoColorize;
use std::fmt;

use crate::presentation::DisplayOptions;
use crate::presentation::view_models::ValidationViewModel;

pub struct ValidationView<'a> {
    data: &'a ValidationViewModel,
    options: DisplayOptions,
}

impl<'a> ValidationView<'a> {
    pub fn new(data: &'a ValidationViewModel, options: DisplayOptions) -> Self {
        Self { data, options }
    }
}

impl fmt::Display for ValidationView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.data;
        let ok = format!("{}: ok", data.path);
        if self.options.enable_color {
            writeln!(f, "{}", ok.green())?;
        } else {
            writeln!(f, "{}", ok)?;
        }
        writeln!(f, "  records:  {}", data.records)?;
        writeln!(f, "  jobs:     {} ({} finished)", data.jobs, data.finished_jobs)?;
        if let Some(id) = &data.workflow_id {
            writeln!(f, "  workflow: {}", id)?;
        }
        if !data.unknown_jobs.is_empty() {
            let ids: Vec<String> = data.unknown_jobs.iter().map(i64::to_string).collect();
            writeln!(f, "  undescribed jobs: {}", ids.join(", "))?;
        }
        if !data.finished {
            writeln!(f, "  logging did not finish")?;
        }
        Ok(())
    }
}
