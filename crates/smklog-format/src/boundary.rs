use serde_json::{Map, Value};
use std::fmt;

/// One complete JSON object and the lines it spanned (1-based, inclusive).
#[derive(Debug, Clone, PartialEq)]
pub struct RawObject {
    pub start_line: usize,
    pub end_line: usize,
    pub value: Map<String, Value>,
}

#[derive(Debug)]
pub enum BoundaryError {
    /// A line that neither opens an object nor is one
    UnexpectedLine { line: usize },

    /// An object's text is not a valid JSON object
    InvalidJson {
        start_line: usize,
        end_line: usize,
        source: serde_json::Error,
    },

    /// Input ended while a pretty-printed object was still open
    Unterminated { start_line: usize },
}

impl fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryError::UnexpectedLine { line } => write!(
                f,
                "line {}: expected an opening brace alone or a complete object",
                line
            ),
            BoundaryError::InvalidJson {
                start_line,
                end_line,
                source,
            } => write!(
                f,
                "lines {}-{}: invalid JSON object: {}",
                start_line, end_line, source
            ),
            BoundaryError::Unterminated { start_line } => write!(
                f,
                "unexpected end of input: object opened on line {} was never closed",
                start_line
            ),
        }
    }
}

impl std::error::Error for BoundaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoundaryError::InvalidJson { source, .. } => Some(source),
            BoundaryError::UnexpectedLine { .. } | BoundaryError::Unterminated { .. } => None,
        }
    }
}

#[derive(Debug)]
struct OpenObject {
    start_line: usize,
    text: String,
}

/// Splits a stream of lines into JSON objects.
///
/// Each object is either a complete object on one line, or spans from a line
/// that is exactly `{` to the next line that is exactly `}`. Trailing
/// whitespace is ignored; leading whitespace is significant, so nested braces
/// of a pretty-printed object never close it early.
#[derive(Debug, Default)]
pub struct ObjectBoundaryParser {
    line_no: usize,
    open: Option<OpenObject>,
}

impl ObjectBoundaryParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }

    /// Whether a multi-line object is waiting for its closing brace.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line, without its line terminator.
    pub fn push_line(&mut self, line: &str) -> Result<Option<RawObject>, BoundaryError> {
        self.line_no += 1;
        let line = line.trim_end();

        if let Some(open) = &mut self.open {
            open.text.push_str(line);
            open.text.push('\n');
            if line != "}" {
                return Ok(None);
            }
            let Some(open) = self.open.take() else {
                return Ok(None);
            };
            return parse_object(&open.text, open.start_line, self.line_no).map(Some);
        }

        if line.is_empty() {
            return Ok(None);
        }

        if line == "{" {
            self.open = Some(OpenObject {
                start_line: self.line_no,
                text: String::from("{\n"),
            });
            return Ok(None);
        }

        if line.starts_with('{')
            && let Ok(value) = serde_json::from_str::<Map<String, Value>>(line)
        {
            return Ok(Some(RawObject {
                start_line: self.line_no,
                end_line: self.line_no,
                value,
            }));
        }

        Err(BoundaryError::UnexpectedLine { line: self.line_no })
    }

    /// Signal end of input. Fails if an object is still open.
    pub fn finish(&mut self) -> Result<(), BoundaryError> {
        match self.open.take() {
            Some(open) => Err(BoundaryError::Unterminated {
                start_line: open.start_line,
            }),
            None => Ok(()),
        }
    }
}

fn parse_object(text: &str, start_line: usize, end_line: usize) -> Result<RawObject, BoundaryError> {
    serde_json::from_str(text)
        .map(|value| RawObject {
            start_line,
            end_line,
            value,
        })
        .map_err(|source| BoundaryError::InvalidJson {
            start_line,
            end_line,
            source,
        })
}
