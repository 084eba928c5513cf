use crate::types::{LogLevel, OutputFormat, RecordLevel};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smklog")]
#[command(about = "Inspect Snakemake JSON event logs", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Timeline of every record in the log
    Show {
        file: PathBuf,

        #[arg(long, default_value = "all")]
        level: RecordLevel,

        /// Only records with an event tag
        #[arg(long)]
        events_only: bool,
    },

    /// Table of all jobs in the run
    Jobs { file: PathBuf },

    /// Details and records of one job
    Job { file: PathBuf, id: i64 },

    /// Every field of one record, by its position in the log
    Record { file: PathBuf, index: usize },

    /// Parse and reduce the log, failing on the first problem
    Validate { file: PathBuf },

    /// Re-encode a log in single-line or multi-line layout
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Write indented multi-line records
        #[arg(long)]
        multiline: bool,
    },
}
