use std::fmt;

/// Result type for smklog-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Log text could not be read or written
    Format(smklog_format::Error),

    /// Records are inconsistent with the run built so far
    Reduce(smklog_engine::ReduceError),

    /// Configuration error
    Config(String),

    /// The handler was closed
    Closed,

    /// An encoded record did not decode back to itself
    Validation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Format(err) => write!(f, "{}", err),
            Error::Reduce(err) => write!(f, "Inconsistent log: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Closed => write!(f, "Log handler is closed"),
            Error::Validation(msg) => write!(f, "Record validation failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Format(err) => Some(err),
            Error::Reduce(err) => Some(err),
            Error::Config(_) | Error::Closed | Error::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<smklog_format::Error> for Error {
    fn from(err: smklog_format::Error) -> Self {
        Error::Format(err)
    }
}

impl From<smklog_engine::ReduceError> for Error {
    fn from(err: smklog_engine::ReduceError) -> Self {
        Error::Reduce(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
