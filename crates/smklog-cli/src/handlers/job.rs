use crate::presentation::view_models::JobDetailViewModel;
use crate::presentation::views::JobDetailView;
use anyhow::Result;
use std::path::Path;

use super::HandlerContext;

pub fn handle(ctx: &HandlerContext, file: &Path, id: i64) -> Result<()> {
    let run = ctx.load(file)?;
    let Some(job) = run.job(id) else {
        if run.pending_job_ids().contains(&id) {
            anyhow::bail!("Job {} has records but no job_info", id);
        }
        anyhow::bail!("Job {} not found", id);
    };

    let model = JobDetailViewModel::from_job(&run, job);
    ctx.render(&model, JobDetailView::new(&model, ctx.options))
}
