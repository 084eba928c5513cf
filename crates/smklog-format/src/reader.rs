use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use smklog_types::{Record, decode_record};

use crate::boundary::{ObjectBoundaryParser, RawObject};
use crate::error::{Error, Result};

/// Lazily decodes records from a source of lines.
///
/// Lines are pulled only until the next object is complete. The first
/// failure is yielded once and ends the iteration; after the last line the
/// end-of-input check runs before `None` is returned.
pub struct RecordReader<I> {
    lines: I,
    parser: ObjectBoundaryParser,
    done: bool,
}

impl<I> RecordReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I) -> Self {
        Self {
            lines,
            parser: ObjectBoundaryParser::new(),
            done: false,
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.parser.line_no()
    }

    fn fail(&mut self, err: Error) -> Option<Result<Record>> {
        self.done = true;
        Some(Err(err))
    }
}

fn decode(raw: RawObject) -> Result<Record> {
    let RawObject {
        start_line,
        end_line,
        value,
    } = raw;
    decode_record(value).map_err(|source| Error::Decode {
        start_line,
        end_line,
        source,
    })
}

impl<I> Iterator for RecordReader<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => match self.parser.push_line(&line) {
                    Ok(Some(raw)) => {
                        let span = (raw.start_line, raw.end_line);
                        return match decode(raw) {
                            Ok(record) => {
                                tracing::trace!(
                                    kind = %record.kind(),
                                    start_line = span.0,
                                    end_line = span.1,
                                    "decoded record"
                                );
                                Some(Ok(record))
                            }
                            Err(err) => self.fail(err),
                        };
                    }
                    Ok(None) => continue,
                    Err(err) => return self.fail(err.into()),
                },
                Some(Err(err)) => return self.fail(err.into()),
                None => {
                    self.done = true;
                    return match self.parser.finish() {
                        Ok(()) => None,
                        Err(err) => Some(Err(err.into())),
                    };
                }
            }
        }
    }
}

/// Read records from any buffered source.
pub fn read_records<R: BufRead>(reader: R) -> RecordReader<io::Lines<R>> {
    RecordReader::new(reader.lines())
}

/// Read records from in-memory text.
pub fn parse_str(text: &str) -> RecordReader<io::Lines<&[u8]>> {
    read_records(text.as_bytes())
}

/// Open a log file for reading. Records are decoded as the iterator is driven.
pub fn parse_logfile(path: &Path) -> Result<RecordReader<io::Lines<BufReader<File>>>> {
    let file = File::open(path)?;
    tracing::debug!(path = %path.display(), "opened log file");
    Ok(read_records(BufReader::new(file)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRESS: &str = r#"{"type":"snakemake","event":"progress","message":null,"levelno":20,"created":1.0,"done":1,"total":2}"#;

    #[test]
    fn test_reads_mixed_layouts() {
        let text = format!(
            "{}\n{{\n  \"type\": \"standard\",\n  \"message\": \"hi\",\n  \"levelno\": 20,\n  \"created\": 2.0\n}}\n",
            PROGRESS
        );
        let records: Vec<Record> = parse_str(&text).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event(), Some("progress"));
        assert_eq!(records[1].message(), Some("hi"));
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert_eq!(parse_str("").count(), 0);
        assert_eq!(parse_str("\n\n  \n").count(), 0);
    }

    #[test]
    fn test_decode_error_carries_span_and_stops() {
        let text = format!(
            "{}\n{}\n{}\n",
            PROGRESS, r#"{"type":"snakemake","event":"nope","created":1.0}"#, PROGRESS
        );
        let mut reader = parse_str(&text);
        assert!(reader.next().unwrap().is_ok());

        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            Error::Decode {
                start_line: 2,
                end_line: 2,
                ..
            }
        ));
        assert_eq!(err.line(), Some(2));
        assert!(reader.next().is_none());
        assert_eq!(reader.line_no(), 2);
    }

    #[test]
    fn test_truncated_input_fails_after_last_record() {
        let text = format!("{}\n{{\n  \"type\": \"standard\",\n", PROGRESS);
        let mut reader = parse_str(&text);
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert!(err.to_string().contains("opened on line 2"));
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_reads_lazily() {
        let lines = vec![
            Ok(PROGRESS.to_string()),
            Err(io::Error::other("disk on fire")),
        ];
        let mut reader = RecordReader::new(lines.into_iter());
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.line_no(), 1);
        assert!(matches!(reader.next(), Some(Err(Error::Io(_)))));
        assert!(reader.next().is_none());
    }
}
