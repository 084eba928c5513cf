use std::fmt;

use crate::boundary::BoundaryError;

/// Result type for smklog-format operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reading or writing a log
#[derive(Debug)]
pub enum Error {
    /// IO operation failed
    Io(std::io::Error),

    /// Object boundaries could not be detected
    Boundary(BoundaryError),

    /// An object was found but is not a valid record
    Decode {
        start_line: usize,
        end_line: usize,
        source: smklog_types::DecodeError,
    },

    /// JSON encoding failed
    Json(serde_json::Error),
}

impl Error {
    /// First line of the offending object, if the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Boundary(BoundaryError::UnexpectedLine { line }) => Some(*line),
            Error::Boundary(BoundaryError::InvalidJson { start_line, .. })
            | Error::Boundary(BoundaryError::Unterminated { start_line })
            | Error::Decode { start_line, .. } => Some(*start_line),
            Error::Io(_) | Error::Json(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Boundary(err) => write!(f, "Parse error: {}", err),
            Error::Decode {
                start_line,
                end_line,
                source,
            } if start_line == end_line => {
                write!(f, "Invalid record on line {}: {}", start_line, source)
            }
            Error::Decode {
                start_line,
                end_line,
                source,
            } => write!(
                f,
                "Invalid record on lines {}-{}: {}",
                start_line, end_line, source
            ),
            Error::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Boundary(err) => Some(err),
            Error::Decode { source, .. } => Some(source),
            Error::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<BoundaryError> for Error {
    fn from(err: BoundaryError) -> Self {
        Error::Boundary(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
