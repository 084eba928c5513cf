use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Minimum record level shown by `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum RecordLevel {
    All,
    Debug,
    Info,
    Warning,
    Error,
}

impl RecordLevel {
    pub fn min_levelno(&self) -> i64 {
        use smklog_types::level;
        match self {
            RecordLevel::All => i64::MIN,
            RecordLevel::Debug => level::DEBUG,
            RecordLevel::Info => level::INFO,
            RecordLevel::Warning => level::WARNING,
            RecordLevel::Error => level::ERROR,
        }
    }
}

impl fmt::Display for RecordLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordLevel::All => write!(f, "all"),
            RecordLevel::Debug => write!(f, "debug"),
            RecordLevel::Info => write!(f, "info"),
            RecordLevel::Warning => write!(f, "warning"),
            RecordLevel::Error => write!(f, "error"),
        }
    }
}
