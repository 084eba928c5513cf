use std::io::Write;

use smklog_types::Record;

use crate::error::Result;

/// How each record is laid out in the log text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Compact JSON, one record per line
    #[default]
    SingleLine,
    /// Two-space indented JSON with the outer braces alone at column 0
    Pretty,
}

impl Layout {
    pub fn from_multiline(multiline: bool) -> Self {
        if multiline {
            Layout::Pretty
        } else {
            Layout::SingleLine
        }
    }
}

/// Encode one record without a trailing newline.
pub fn encode_record(record: &Record, layout: Layout) -> Result<String> {
    let text = match layout {
        Layout::SingleLine => serde_json::to_string(record)?,
        Layout::Pretty => serde_json::to_string_pretty(record)?,
    };
    Ok(text)
}

/// Writes records to a byte sink, one record plus newline per call.
#[derive(Debug)]
pub struct RecordWriter<W> {
    inner: W,
    layout: Layout,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, layout: Layout) -> Self {
        Self { inner, layout }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// The record is encoded in full before anything reaches the sink.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        let mut text = encode_record(record, self.layout)?;
        text.push('\n');
        self.inner.write_all(text.as_bytes())?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
