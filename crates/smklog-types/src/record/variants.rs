use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

use super::base::{level, ExceptionInfo, RecordBase};
use super::tag::{MetaEvent, RecordKind, SnakemakeEvent};
use super::Record;
use crate::clock::Clock;
use crate::decode::{BaseDefaults, FieldReader};
use crate::error::Result;

/// Static description of one concrete record shape.
///
/// Each variant states its registry key, its own field names (the common
/// header excluded) and how to read itself from a field map. The registry
/// table is built from these constants.
pub trait RecordVariant: Sized + Into<Record> {
    const KIND: RecordKind;
    const NAME: &'static str;
    const FIELDS: &'static [&'static str];
    const DEFAULTS: BaseDefaults = BaseDefaults::NONE;

    /// Read the variant-specific fields after the header has been taken.
    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self>;

    fn decode(fields: &mut FieldReader) -> Result<Self> {
        let base = fields.base(Self::DEFAULTS)?;
        Self::decode_fields(base, fields)
    }
}

// --------------------------------------------------------------------------
// Standard
// --------------------------------------------------------------------------

/// A plain log line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandardRecord {
    #[serde(flatten)]
    pub base: RecordBase,
}

impl StandardRecord {
    pub fn new(base: RecordBase) -> Self {
        Self { base }
    }
}

impl RecordVariant for StandardRecord {
    const KIND: RecordKind = RecordKind::Standard;
    const NAME: &'static str = "Standard";
    const FIELDS: &'static [&'static str] = &[];

    fn decode_fields(base: RecordBase, _fields: &mut FieldReader) -> Result<Self> {
        Ok(Self { base })
    }
}

// --------------------------------------------------------------------------
// Meta
// --------------------------------------------------------------------------

/// Written once when the logging system is initialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingStartedRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    /// ID of the workflow engine process
    pub pid: i64,
    /// When that process started, to tell apart a reused PID
    pub proc_started: Option<f64>,
}

impl LoggingStartedRecord {
    pub fn new(pid: i64, proc_started: Option<f64>, clock: &dyn Clock) -> Self {
        Self {
            base: Self::DEFAULTS.base(clock),
            pid,
            proc_started,
        }
    }
}

impl RecordVariant for LoggingStartedRecord {
    const KIND: RecordKind = RecordKind::Meta(MetaEvent::LoggingStarted);
    const NAME: &'static str = "LoggingStarted";
    const FIELDS: &'static [&'static str] = &["pid", "proc_started"];
    const DEFAULTS: BaseDefaults = BaseDefaults {
        levelno: Some(level::INFO),
        message: Some("JSON logging plugin initialized"),
    };

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            pid: fields.required("pid")?,
            proc_started: fields.optional("proc_started")?,
        })
    }
}

/// Terminal marker written when the log is closed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggingFinishedRecord {
    #[serde(flatten)]
    pub base: RecordBase,
}

impl LoggingFinishedRecord {
    pub fn new(clock: &dyn Clock) -> Self {
        Self {
            base: Self::DEFAULTS.base(clock),
        }
    }
}

impl RecordVariant for LoggingFinishedRecord {
    const KIND: RecordKind = RecordKind::Meta(MetaEvent::LoggingFinished);
    const NAME: &'static str = "LoggingFinished";
    const FIELDS: &'static [&'static str] = &[];
    const DEFAULTS: BaseDefaults = BaseDefaults {
        levelno: Some(level::INFO),
        message: Some("JSON logging finished"),
    };

    fn decode_fields(base: RecordBase, _fields: &mut FieldReader) -> Result<Self> {
        Ok(Self { base })
    }
}

/// Stands in for an entry that could not be converted to a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattingErrorRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    /// Header attributes that were extracted before the failure
    pub record_partial: Map<String, Value>,
    pub exception: Option<ExceptionInfo>,
}

impl FormattingErrorRecord {
    /// The message defaults to the exception's message when one is given.
    pub fn new(
        record_partial: Map<String, Value>,
        exception: Option<ExceptionInfo>,
        message: Option<String>,
        clock: &dyn Clock,
    ) -> Self {
        let message = message
            .or_else(|| exception.as_ref().map(|exc| exc.message.clone()))
            .unwrap_or_else(|| "Error formatting log record".to_string());
        Self {
            base: RecordBase::now(clock, level::ERROR, Some(message)),
            record_partial,
            exception,
        }
    }
}

impl RecordVariant for FormattingErrorRecord {
    const KIND: RecordKind = RecordKind::Meta(MetaEvent::FormattingError);
    const NAME: &'static str = "FormattingError";
    const FIELDS: &'static [&'static str] = &["record_partial", "exception"];
    const DEFAULTS: BaseDefaults = BaseDefaults {
        levelno: Some(level::ERROR),
        message: Some("Error converting log record to JSON"),
    };

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            record_partial: fields.required("record_partial")?,
            exception: fields.optional("exception")?,
        })
    }
}

// --------------------------------------------------------------------------
// Snakemake
// --------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub exception: Option<String>,
    pub location: Option<String>,
    pub rule: Option<String>,
    pub traceback: Option<String>,
    pub file: Option<String>,
    pub line: Option<String>,
}

impl RecordVariant for ErrorRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::Error);
    const NAME: &'static str = "Error";
    const FIELDS: &'static [&'static str] =
        &["exception", "location", "rule", "traceback", "file", "line"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            exception: fields.optional("exception")?,
            location: fields.optional("location")?,
            rule: fields.optional("rule")?,
            traceback: fields.optional("traceback")?,
            file: fields.optional("file")?,
            line: fields.optional("line")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStartedRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub workflow_id: Uuid,
    pub snakefile: Option<PathBuf>,
}

impl RecordVariant for WorkflowStartedRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::WorkflowStarted);
    const NAME: &'static str = "WorkflowStarted";
    const FIELDS: &'static [&'static str] = &["workflow_id", "snakefile"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            workflow_id: fields.required("workflow_id")?,
            snakefile: fields.optional("snakefile")?,
        })
    }
}

/// Describes a job when it is scheduled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobInfoRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub jobid: i64,
    pub rule_name: String,
    pub threads: i64,
    pub input: Option<Vec<String>>,
    pub output: Option<Vec<String>>,
    pub log: Option<Vec<String>>,
    pub benchmark: Option<String>,
    pub rule_msg: Option<String>,
    pub wildcards: Option<Map<String, Value>>,
    pub reason: Option<String>,
    pub shellcmd: Option<String>,
    pub priority: Option<i64>,
    /// Either a mapping or a list, depending on the engine version
    pub resources: Option<Value>,
}

impl RecordVariant for JobInfoRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::JobInfo);
    const NAME: &'static str = "JobInfo";
    const FIELDS: &'static [&'static str] = &[
        "jobid",
        "rule_name",
        "threads",
        "input",
        "output",
        "log",
        "benchmark",
        "rule_msg",
        "wildcards",
        "reason",
        "shellcmd",
        "priority",
        "resources",
    ];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        let resources: Option<Value> = fields.optional("resources")?;
        if let Some(value) = &resources
            && !(value.is_object() || value.is_array())
        {
            return Err(crate::error::DecodeError::InvalidField {
                field: "resources".to_string(),
                reason: format!("expected a map or a list, found {}", value),
            });
        }

        Ok(Self {
            base,
            jobid: fields.required("jobid")?,
            rule_name: fields.required("rule_name")?,
            threads: fields.required("threads")?,
            input: fields.optional("input")?,
            output: fields.optional("output")?,
            log: fields.optional("log")?,
            benchmark: fields.optional("benchmark")?,
            rule_msg: fields.optional("rule_msg")?,
            wildcards: fields.optional("wildcards")?,
            reason: fields.optional("reason")?,
            shellcmd: fields.optional("shellcmd")?,
            priority: fields.optional("priority")?,
            resources,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobStartedRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub jobs: Vec<i64>,
}

impl RecordVariant for JobStartedRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::JobStarted);
    const NAME: &'static str = "JobStarted";
    const FIELDS: &'static [&'static str] = &["jobs"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            jobs: fields.required("jobs")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobFinishedRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub job_id: i64,
}

impl RecordVariant for JobFinishedRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::JobFinished);
    const NAME: &'static str = "JobFinished";
    const FIELDS: &'static [&'static str] = &["job_id"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            job_id: fields.required("job_id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShellCmdRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub jobid: Option<i64>,
    pub shellcmd: Option<String>,
    pub rule_name: Option<String>,
}

impl RecordVariant for ShellCmdRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::ShellCmd);
    const NAME: &'static str = "ShellCmd";
    const FIELDS: &'static [&'static str] = &["jobid", "shellcmd", "rule_name"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            jobid: fields.optional("jobid")?,
            shellcmd: fields.optional("shellcmd")?,
            rule_name: fields.optional("rule_name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobErrorRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub jobid: i64,
}

impl RecordVariant for JobErrorRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::JobError);
    const NAME: &'static str = "JobError";
    const FIELDS: &'static [&'static str] = &["jobid"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            jobid: fields.required("jobid")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupInfoRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub group_id: i64,
    pub jobs: Vec<Value>,
}

impl RecordVariant for GroupInfoRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::GroupInfo);
    const NAME: &'static str = "GroupInfo";
    const FIELDS: &'static [&'static str] = &["group_id", "jobs"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            group_id: fields.required("group_id")?,
            jobs: fields.required("jobs")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupErrorRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub groupid: i64,
    pub aux_logs: Vec<Value>,
    pub job_error_info: Map<String, Value>,
}

impl RecordVariant for GroupErrorRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::GroupError);
    const NAME: &'static str = "GroupError";
    const FIELDS: &'static [&'static str] = &["groupid", "aux_logs", "job_error_info"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            groupid: fields.required("groupid")?,
            aux_logs: fields.required("aux_logs")?,
            job_error_info: fields.required("job_error_info")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourcesInfoRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub nodes: Option<Vec<String>>,
    pub cores: Option<i64>,
    pub provided_resources: Option<Map<String, Value>>,
}

impl RecordVariant for ResourcesInfoRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::ResourcesInfo);
    const NAME: &'static str = "ResourcesInfo";
    const FIELDS: &'static [&'static str] = &["nodes", "cores", "provided_resources"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            nodes: fields.optional("nodes")?,
            cores: fields.optional("cores")?,
            provided_resources: fields.optional("provided_resources")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugDagRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub status: Option<String>,
    pub job: Option<Value>,
    pub file: Option<String>,
    pub exception: Option<String>,
}

impl RecordVariant for DebugDagRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::DebugDag);
    const NAME: &'static str = "DebugDag";
    const FIELDS: &'static [&'static str] = &["status", "job", "file", "exception"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            status: fields.optional("status")?,
            job: fields.optional("job")?,
            file: fields.optional("file")?,
            exception: fields.optional("exception")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub done: i64,
    pub total: i64,
}

impl RecordVariant for ProgressRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::Progress);
    const NAME: &'static str = "Progress";
    const FIELDS: &'static [&'static str] = &["done", "total"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            done: fields.required("done")?,
            total: fields.required("total")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RulegraphRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    pub rulegraph: Option<Map<String, Value>>,
}

impl RecordVariant for RulegraphRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::Rulegraph);
    const NAME: &'static str = "Rulegraph";
    const FIELDS: &'static [&'static str] = &["rulegraph"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            rulegraph: fields.optional("rulegraph")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunInfoRecord {
    #[serde(flatten)]
    pub base: RecordBase,
    /// Job counts per rule, plus the `total` entry
    pub stats: BTreeMap<String, i64>,
}

impl RecordVariant for RunInfoRecord {
    const KIND: RecordKind = RecordKind::Snakemake(SnakemakeEvent::RunInfo);
    const NAME: &'static str = "RunInfo";
    const FIELDS: &'static [&'static str] = &["stats"];

    fn decode_fields(base: RecordBase, fields: &mut FieldReader) -> Result<Self> {
        Ok(Self {
            base,
            stats: fields.required("stats")?,
        })
    }
}
