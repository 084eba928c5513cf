use crate::presentation::view_models::TimelineViewModel;
use crate::presentation::views::TimelineView;
use crate::types::RecordLevel;
use anyhow::Result;
use std::path::Path;

use super::HandlerContext;

pub fn handle(
    ctx: &HandlerContext,
    file: &Path,
    level: RecordLevel,
    events_only: bool,
) -> Result<()> {
    let run = ctx.load(file)?;
    let min_levelno = level.min_levelno();

    let model = TimelineViewModel::from_run(&run, |record| {
        record.levelno() >= min_levelno && (!events_only || record.event().is_some())
    });
    ctx.render(&model, TimelineView::new(&model, ctx.options))
}
