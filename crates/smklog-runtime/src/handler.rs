use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smklog_format::{RecordWriter, encode_record};
use smklog_types::{
    Clock, ExceptionInfo, FormattingErrorRecord, LoggingFinishedRecord, LoggingStartedRecord,
    Record,
};

use crate::config::{HandlerSettings, default_log_path};
use crate::entry::LogEntry;
use crate::error::{Error, Result};

enum Sink {
    File(BufWriter<File>),
    Stderr(io::Stderr),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Sink::File(file) => file.write(buf),
            Sink::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Sink::File(file) => file.write_all(buf),
            Sink::Stderr(stderr) => stderr.lock().write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::File(file) => file.flush(),
            Sink::Stderr(stderr) => stderr.flush(),
        }
    }
}

/// Writes records from a running workflow to a JSON log.
///
/// The log starts with a `logging_started` record and, once closed, ends with
/// `logging_finished`. Any number of threads may emit concurrently; each
/// record is written whole.
pub struct JsonLogHandler {
    settings: HandlerSettings,
    path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    writer: Mutex<Option<RecordWriter<Sink>>>,
}

impl JsonLogHandler {
    /// Open the configured sink and write the start marker.
    pub fn open(settings: HandlerSettings, clock: Arc<dyn Clock>) -> Result<Self> {
        let (path, sink) = if settings.writes_to_stderr() {
            (None, Sink::Stderr(io::stderr()))
        } else {
            let path = match &settings.file {
                Some(file) => file.clone(),
                None => default_log_path(None, clock.as_ref()),
            };
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            let file = File::create(&path)?;
            (Some(path), Sink::File(BufWriter::new(file)))
        };

        tracing::debug!(
            path = ?path,
            multiline = settings.multiline,
            "opened JSON log"
        );

        let handler = Self {
            writer: Mutex::new(Some(RecordWriter::new(sink, settings.layout()))),
            settings,
            path,
            clock,
        };

        let pid = std::process::id() as i64;
        let start = LoggingStartedRecord::new(pid, None, handler.clock.as_ref());
        handler.emit(&start.into())?;
        Ok(handler)
    }

    pub fn settings(&self) -> &HandlerSettings {
        &self.settings
    }

    /// Log file path, `None` when writing to stderr.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn writes_to_file(&self) -> bool {
        self.path.is_some()
    }

    pub fn needs_rulegraph(&self) -> bool {
        self.settings.rulegraph
    }

    fn lock(&self) -> MutexGuard<'_, Option<RecordWriter<Sink>>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Re-encode and decode a record, failing if it changes.
    fn validate(&self, record: &Record) -> Result<()> {
        let text = encode_record(record, self.settings.layout())?;
        let decoded: Record =
            serde_json::from_str(&text).map_err(|err| Error::Validation(err.to_string()))?;
        if &decoded != record {
            return Err(Error::Validation(format!(
                "{} record did not survive encoding",
                record.kind()
            )));
        }
        Ok(())
    }

    /// Write one record.
    pub fn emit(&self, record: &Record) -> Result<()> {
        if self.settings.validate {
            self.validate(record)?;
        }
        self.write(record)
    }

    /// Write and flush one record under the lock, so readers never see a partial tail.
    fn write(&self, record: &Record) -> Result<()> {
        let mut guard = self.lock();
        let writer = guard.as_mut().ok_or(Error::Closed)?;
        writer.write_record(record)?;
        writer.flush()?;
        Ok(())
    }

    /// Convert an entry and write it.
    ///
    /// An entry that does not form a valid record is written as a
    /// `formatting_error` record holding its header instead.
    pub fn emit_entry(&self, entry: &LogEntry) -> Result<()> {
        let converted = entry.to_record().map_err(|err| ExceptionInfo::from_error(&err));
        let converted = match converted {
            Ok(record) if self.settings.validate => self
                .validate(&record)
                .map(|()| record)
                .map_err(|err| ExceptionInfo::from_error(&err)),
            other => other,
        };

        let record = match converted {
            Ok(record) => record,
            Err(exception) => {
                tracing::warn!(
                    kind = %entry.kind(),
                    error = %exception.message,
                    "log entry could not be converted"
                );
                let clock = self.clock.as_ref();
                FormattingErrorRecord::new(entry.partial(), Some(exception), None, clock).into()
            }
        };

        self.write(&record)
    }

    pub fn flush(&self) -> Result<()> {
        let mut guard = self.lock();
        if let Some(writer) = guard.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }

    /// Write the end marker and flush. Later emits fail with [`Error::Closed`].
    pub fn close(&self) -> Result<()> {
        let mut guard = self.lock();
        let Some(mut writer) = guard.take() else {
            return Ok(());
        };
        let finish: Record = LoggingFinishedRecord::new(self.clock.as_ref()).into();
        writer.write_record(&finish)?;
        writer.flush()?;
        tracing::debug!(path = ?self.path, "closed JSON log");
        Ok(())
    }
}

impl Drop for JsonLogHandler {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::warn!(error = %err, "failed to close JSON log");
        }
    }
}
