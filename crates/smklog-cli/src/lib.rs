// smklog CLI - read-only views over a reduced Snakemake run.
//
// Every command loads a log file, folds it into a RunStatus and renders
// either plain text or JSON. Nothing is written back except by `convert`.

mod args;
mod commands;
mod handlers;
pub mod presentation;
pub mod types;

pub use args::{Cli, Commands};
pub use commands::run;
