// Runtime layer - writing logs from a running engine and loading them back.

pub mod config;
pub mod entry;
pub mod error;
pub mod handler;
pub mod loader;

pub use config::{HandlerSettings, default_log_path};
pub use entry::LogEntry;
pub use error::{Error, Result};
pub use handler::JsonLogHandler;
pub use loader::{RunLoad, load_run, load_run_partial};
