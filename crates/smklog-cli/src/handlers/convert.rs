use anyhow::{Context, Result};
use smklog_format::{Layout, RecordWriter, parse_logfile};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::HandlerContext;
use crate::types::OutputFormat;

pub fn handle(ctx: &HandlerContext, input: &Path, output: &Path, multiline: bool) -> Result<()> {
    let reader = parse_logfile(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;

    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let mut writer = RecordWriter::new(BufWriter::new(file), Layout::from_multiline(multiline));

    let mut count = 0usize;
    for record in reader {
        let record = match record {
            Ok(record) => record,
            Err(err) => anyhow::bail!("{}: {}", input.display(), err),
        };
        writer.write_record(&record)?;
        count += 1;
    }
    writer.flush()?;
    tracing::debug!(records = count, output = %output.display(), "converted log");

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "output": output.display().to_string(), "records": count })
        ),
        OutputFormat::Plain => println!("Wrote {} records to {}", count, output.display()),
    }
    Ok(())
}
