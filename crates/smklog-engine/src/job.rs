use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use smklog_types::{JobInfoRecord, Record};

use crate::run::RunStatus;

/// Where a job stands, judged from its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Running,
    Finished,
    Failed,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Running => write!(f, "running"),
            JobState::Finished => write!(f, "finished"),
            JobState::Failed => write!(f, "failed"),
        }
    }
}

/// A job known to the run, created from its `job_info` record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobInfo {
    pub id: i64,
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
    pub resources: Option<Value>,

    pub started: DateTime<Utc>,
    pub finished: Option<DateTime<Utc>>,

    /// Positions in [`RunStatus::logs`] of every record about this job, in arrival order
    pub logs: Vec<usize>,
}

impl JobInfo {
    pub fn from_record(record: &JobInfoRecord) -> Self {
        Self {
            id: record.jobid,
            rule_name: record.rule_name.clone(),
            threads: record.threads,
            input: record.input.clone(),
            output: record.output.clone(),
            log: record.log.clone(),
            benchmark: record.benchmark.clone(),
            rule_msg: record.rule_msg.clone(),
            wildcards: record.wildcards.clone(),
            reason: record.reason.clone(),
            shellcmd: record.shellcmd.clone(),
            priority: record.priority,
            resources: record.resources.clone(),
            started: record.base.created_dt(),
            finished: None,
            logs: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.finished.map(|finished| finished - self.started)
    }

    /// The job's records, resolved against the run that owns them.
    pub fn records<'a>(&'a self, run: &'a RunStatus) -> impl Iterator<Item = &'a Record> + 'a {
        self.logs.iter().filter_map(|&index| run.logs.get(index))
    }

    pub fn state(&self, run: &RunStatus) -> JobState {
        if self
            .records(run)
            .any(|record| matches!(record, Record::JobError(_)))
        {
            JobState::Failed
        } else if self.is_finished() {
            JobState::Finished
        } else {
            JobState::Running
        }
    }
}
