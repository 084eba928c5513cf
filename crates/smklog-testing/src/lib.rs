//! Testing infrastructure for smklog integration tests.
//!
//! - `fixtures`: one example record per variant, with cycling levels and timestamps
//! - `scenario`: fluent builder for ordered event streams fed to the reducer
//! - `samples`: rendering records to log text and placing log files on disk

pub mod fixtures;
pub mod samples;
pub mod scenario;

pub use fixtures::{
    RANDOM_TIMESTAMP, RecordFactory, example_records, example_records_meta,
    example_records_snakemake, example_records_standard,
};
pub use samples::{SampleLog, render_log, sample_path};
pub use scenario::Scenario;
