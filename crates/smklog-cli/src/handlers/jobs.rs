use crate::presentation::view_models::JobTableViewModel;
use crate::presentation::views::JobTableView;
use anyhow::Result;
use std::path::Path;

use super::HandlerContext;

pub fn handle(ctx: &HandlerContext, file: &Path) -> Result<()> {
    let run = ctx.load(file)?;
    let model = JobTableViewModel::from_run(&run);
    ctx.render(&model, JobTableView::new(&model, ctx.options))
}
