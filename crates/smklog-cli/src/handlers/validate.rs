use crate::presentation::view_models::ValidationViewModel;
use crate::presentation::views::ValidationView;
use anyhow::Result;
use smklog_runtime::load_run;
use std::path::Path;

use super::HandlerContext;

pub fn handle(ctx: &HandlerContext, file: &Path) -> Result<()> {
    let run = match load_run(file) {
        Ok(run) => run,
        Err(err) => anyhow::bail!("{} is not a valid log: {}", file.display(), err),
    };

    let path = file.display().to_string();
    let model = ValidationViewModel::from_run(&path, &run);
    ctx.render(&model, ValidationView::new(&model, ctx.options))
}
