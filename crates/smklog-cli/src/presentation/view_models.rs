//! Serializable models behind every view. `--format json` prints these as-is.

use serde::Serialize;
use serde_json::{Map, Value};
use smklog_engine::{JobInfo, JobState, RunStatus};
use smklog_types::{ExceptionInfo, Record};

use super::formatters::time::{format_optional_td, format_td};

/// One line of the timeline.
#[derive(Debug, Clone, Serialize)]
pub struct RecordRow {
    pub index: usize,
    /// Offset from run start, `H:MM:SS`
    pub elapsed: String,
    pub levelno: i64,
    pub levelname: String,
    pub event: Option<&'static str>,
    pub message: Option<String>,
    pub jobs: Vec<i64>,
}

impl RecordRow {
    pub fn from_record(run: &RunStatus, index: usize, record: &Record) -> Self {
        let mut jobs = record.associated_jobs();
        jobs.sort_unstable();
        Self {
            index,
            elapsed: format_optional_td(run.elapsed(record)),
            levelno: record.levelno(),
            levelname: record.levelname(),
            event: record.event(),
            message: record.message().map(str::to_string),
            jobs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineViewModel {
    pub workflow_id: Option<String>,
    pub started: Option<String>,
    pub finished: bool,
    pub records: Vec<RecordRow>,
}

impl TimelineViewModel {
    pub fn from_run(run: &RunStatus, keep: impl Fn(&Record) -> bool) -> Self {
        Self {
            workflow_id: run.workflow_id.map(|id| id.to_string()),
            started: run.started.map(|started| started.to_rfc3339()),
            finished: run.is_finished(),
            records: run
                .logs
                .iter()
                .enumerate()
                .filter(|(_, record)| keep(*record))
                .map(|(index, record)| RecordRow::from_record(run, index, record))
                .collect(),
        }
    }
}

/// One line of the job table.
#[derive(Debug, Clone, Serialize)]
pub struct JobRow {
    pub id: i64,
    pub rule: String,
    pub state: JobState,
    /// Offset of the job's start from run start
    pub started: String,
    pub duration: String,
}

impl JobRow {
    pub fn from_job(run: &RunStatus, job: &JobInfo) -> Self {
        Self {
            id: job.id,
            rule: job.rule_name.clone(),
            state: job.state(run),
            started: format_optional_td(run.started.map(|started| job.started - started)),
            duration: job.duration().map(format_td).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobTableViewModel {
    pub jobs: Vec<JobRow>,
    /// Jobs named by records but never described
    pub unknown_jobs: Vec<i64>,
}

impl JobTableViewModel {
    pub fn from_run(run: &RunStatus) -> Self {
        Self {
            jobs: run
                .jobs
                .values()
                .map(|job| JobRow::from_job(run, job))
                .collect(),
            unknown_jobs: run.pending_job_ids(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDetailViewModel {
    #[serde(flatten)]
    pub summary: JobRow,
    pub threads: i64,
    pub input: Option<Vec<String>>,
    pub output: Option<Vec<String>>,
    pub log: Option<Vec<String>>,
    pub wildcards: Option<Map<String, Value>>,
    pub reason: Option<String>,
    pub shellcmd: Option<String>,
    pub records: Vec<RecordRow>,
}

impl JobDetailViewModel {
    pub fn from_job(run: &RunStatus, job: &JobInfo) -> Self {
        Self {
            summary: JobRow::from_job(run, job),
            threads: job.threads,
            input: job.input.clone(),
            output: job.output.clone(),
            log: job.log.clone(),
            wildcards: job.wildcards.clone(),
            reason: job.reason.clone(),
            shellcmd: job.shellcmd.clone(),
            records: job
                .logs
                .iter()
                .filter_map(|&index| {
                    run.logs
                        .get(index)
                        .map(|record| RecordRow::from_record(run, index, record))
                })
                .collect(),
        }
    }
}

/// Fields naming jobs; already shown as the `jobs` column.
const JOB_ID_FIELDS: &[&str] = &["jobid", "job_id", "jobs"];

/// One record with every field of its variant.
#[derive(Debug, Clone, Serialize)]
pub struct RecordDetailViewModel {
    #[serde(flatten)]
    pub summary: RecordRow,
    pub kind: String,
    pub exc_info: Option<ExceptionInfo>,
    pub fields: Map<String, Value>,
}

impl RecordDetailViewModel {
    pub fn from_record(run: &RunStatus, index: usize, record: &Record) -> Self {
        Self {
            summary: RecordRow::from_record(run, index, record),
            kind: record.kind().to_string(),
            exc_info: record.exc_info().cloned(),
            fields: record
                .extra_fields()
                .into_iter()
                .filter(|(name, _)| !JOB_ID_FIELDS.contains(name))
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationViewModel {
    pub path: String,
    pub records: usize,
    pub jobs: usize,
    pub finished_jobs: usize,
    pub unknown_jobs: Vec<i64>,
    pub workflow_id: Option<String>,
    pub finished: bool,
}

impl ValidationViewModel {
    pub fn from_run(path: &str, run: &RunStatus) -> Self {
        Self {
            path: path.to_string(),
            records: run.logs.len(),
            jobs: run.jobs.len(),
            finished_jobs: run.jobs.values().filter(|job| job.is_finished()).count(),
            unknown_jobs: run.pending_job_ids(),
            workflow_id: run.workflow_id.map(|id| id.to_string()),
            finished: run.is_finished(),
        }
    }
}
