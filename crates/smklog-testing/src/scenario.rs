//! Fluent builder for ordered record streams.
//!
//! ```
//! use smklog_testing::Scenario;
//!
//! let records = Scenario::new()
//!     .workflow_started("f0915278-1f9d-4cc8-a2b3-f23c3649c7e4")
//!     .job_info(1, "align")
//!     .job_started(&[1])
//!     .advance(30.0)
//!     .job_finished(1)
//!     .build();
//! assert_eq!(records.len(), 4);
//! ```

use serde_json::{Map, Value, json};
use smklog_types::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

use crate::fixtures::RANDOM_TIMESTAMP;

/// Builds records one second apart unless told to [`advance`](Scenario::advance).
#[derive(Debug, Clone)]
pub struct Scenario {
    now: f64,
    records: Vec<Record>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}

impl Scenario {
    pub fn new() -> Self {
        Self {
            now: RANDOM_TIMESTAMP,
            records: Vec::new(),
        }
    }

    fn base(&mut self, levelno: i64, message: Option<String>) -> RecordBase {
        let base = RecordBase::new(levelno, message, self.now);
        self.now += 1.0;
        base
    }

    fn push(mut self, record: impl Into<Record>) -> Self {
        self.records.push(record.into());
        self
    }

    /// Move the clock forward before the next record.
    pub fn advance(mut self, secs: f64) -> Self {
        self.now += secs;
        self
    }

    pub fn logging_started(mut self, pid: i64) -> Self {
        let base = self.base(level::INFO, Some("JSON logging plugin initialized".into()));
        self.push(LoggingStartedRecord {
            base,
            pid,
            proc_started: None,
        })
    }

    pub fn logging_finished(mut self) -> Self {
        let base = self.base(level::INFO, Some("JSON logging finished".into()));
        self.push(LoggingFinishedRecord { base })
    }

    pub fn message(mut self, levelno: i64, message: &str) -> Self {
        let base = self.base(levelno, Some(message.to_string()));
        self.push(StandardRecord::new(base))
    }

    pub fn info(self, message: &str) -> Self {
        self.message(level::INFO, message)
    }

    pub fn workflow_started(mut self, workflow_id: &str) -> Self {
        let base = self.base(level::INFO, None);
        self.push(WorkflowStartedRecord {
            base,
            workflow_id: Uuid::parse_str(workflow_id).unwrap_or_default(),
            snakefile: Some(PathBuf::from("workflow/Snakefile")),
        })
    }

    pub fn run_info(mut self, stats: &[(&str, i64)]) -> Self {
        let base = self.base(level::INFO, Some("Job stats".into()));
        self.push(RunInfoRecord {
            base,
            stats: stats
                .iter()
                .map(|(rule, count)| (rule.to_string(), *count))
                .collect::<BTreeMap<_, _>>(),
        })
    }

    pub fn rulegraph(mut self, rules: &[&str]) -> Self {
        let base = self.base(level::DEBUG, None);
        let nodes: Vec<Value> = rules.iter().map(|rule| json!({"rule": rule})).collect();
        let mut graph = Map::new();
        graph.insert("nodes".to_string(), Value::Array(nodes));
        graph.insert("links".to_string(), Value::Array(Vec::new()));
        self.push(RulegraphRecord {
            base,
            rulegraph: Some(graph),
        })
    }

    pub fn job_info(mut self, jobid: i64, rule_name: &str) -> Self {
        let base = self.base(level::INFO, Some(format!("rule {}", rule_name)));
        self.push(JobInfoRecord {
            base,
            jobid,
            rule_name: rule_name.to_string(),
            threads: 1,
            input: Some(vec![format!("data/{}.in", jobid)]),
            output: Some(vec![format!("results/{}.out", jobid)]),
            log: None,
            benchmark: None,
            rule_msg: None,
            wildcards: None,
            reason: Some("Missing output files".to_string()),
            shellcmd: None,
            priority: Some(0),
            resources: None,
        })
    }

    pub fn job_started(mut self, jobs: &[i64]) -> Self {
        let base = self.base(level::INFO, None);
        self.push(JobStartedRecord {
            base,
            jobs: jobs.to_vec(),
        })
    }

    pub fn job_finished(mut self, job_id: i64) -> Self {
        let base = self.base(level::INFO, Some(format!("Finished job {}.", job_id)));
        self.push(JobFinishedRecord { base, job_id })
    }

    pub fn shell_cmd(mut self, jobid: i64, shellcmd: &str) -> Self {
        let base = self.base(level::INFO, None);
        self.push(ShellCmdRecord {
            base,
            jobid: Some(jobid),
            shellcmd: Some(shellcmd.to_string()),
            rule_name: None,
        })
    }

    pub fn job_error(mut self, jobid: i64) -> Self {
        let base = self.base(level::ERROR, Some(format!("Error in job {}", jobid)));
        self.push(JobErrorRecord { base, jobid })
    }

    pub fn progress(mut self, done: i64, total: i64) -> Self {
        let base = self.base(level::INFO, Some(format!("{} of {} steps done", done, total)));
        self.push(ProgressRecord { base, done, total })
    }

    pub fn build(self) -> Vec<Record> {
        self.records
    }
}
