use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn init_logging(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_string()));
    // A subscriber may already be installed when running in-process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: Cli) -> Result<()> {
    init_logging(&cli);
    smklog_types::registry::init();

    let ctx = HandlerContext::new(cli.format);

    match cli.command {
        Commands::Show {
            file,
            level,
            events_only,
        } => handlers::show::handle(&ctx, &file, level, events_only),
        Commands::Jobs { file } => handlers::jobs::handle(&ctx, &file),
        Commands::Job { file, id } => handlers::job::handle(&ctx, &file, id),
        Commands::Record { file, index } => handlers::record::handle(&ctx, &file, index),
        Commands::Validate { file } => handlers::validate::handle(&ctx, &file),
        Commands::Convert {
            input,
            output,
            multiline,
        } => handlers::convert::handle(&ctx, &input, &output, multiline),
    }
}
