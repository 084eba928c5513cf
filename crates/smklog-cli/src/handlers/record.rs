use crate::presentation::view_models::RecordDetailViewModel;
use crate::presentation::views::RecordDetailView;
use anyhow::Result;
use std::path::Path;

use super::HandlerContext;

pub fn handle(ctx: &HandlerContext, file: &Path, index: usize) -> Result<()> {
    let run = ctx.load(file)?;
    let Some(record) = run.logs.get(index) else {
        anyhow::bail!(
            "Record {} not found (log has {} records)",
            index,
            run.logs.len()
        );
    };

    let model = RecordDetailViewModel::from_record(&run, index, record);
    ctx.render(&model, RecordDetailView::new(&model, ctx.options))
}
