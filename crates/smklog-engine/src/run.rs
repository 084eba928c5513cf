use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use smklog_types::{
    JobFinishedRecord, JobInfoRecord, Record, RulegraphRecord, SnakemakeEvent,
    WorkflowStartedRecord,
};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{ReduceError, Result};
use crate::job::JobInfo;

/// State of one workflow run, rebuilt record by record.
///
/// Records are folded in the order given. A record that contradicts the state
/// so far is rejected and not stored; everything accepted before it stays
/// available.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStatus {
    /// Timestamp of the first record processed
    pub started: Option<DateTime<Utc>>,
    /// Set by a `logging_finished` record
    pub finished: Option<DateTime<Utc>>,
    pub workflow_id: Option<Uuid>,
    pub snakefile: Option<PathBuf>,
    pub rulegraph: Option<Map<String, Value>>,

    /// Every accepted record, unmodified, in arrival order
    pub logs: Vec<Record>,
    pub jobs: BTreeMap<i64, JobInfo>,

    /// Records naming a job before its `job_info` arrived, by job id
    #[serde(skip)]
    pending: HashMap<i64, Vec<usize>>,
}

impl RunStatus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a whole stream, stopping at the first inconsistent record.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Record>,
    {
        let mut run = Self::new();
        for record in records {
            run.process(record)?;
        }
        Ok(run)
    }

    /// Fold one record into the run.
    pub fn process(&mut self, record: Record) -> Result<()> {
        match &record {
            Record::JobInfo(r) => self.process_job_info(r)?,
            Record::JobFinished(r) => self.process_job_finished(r)?,
            Record::WorkflowStarted(r) => self.process_workflow_started(r)?,
            Record::Rulegraph(r) => self.process_rulegraph(r)?,
            Record::LoggingFinished(r) => self.finished = Some(r.base.created_dt()),
            _ => {}
        }

        if self.started.is_none() {
            self.started = Some(record.created_dt());
        }

        let index = self.logs.len();
        if record.is_snakemake() {
            for job_id in record.associated_jobs() {
                self.attach(job_id, index);
            }
        }
        self.logs.push(record);
        Ok(())
    }

    fn attach(&mut self, job_id: i64, index: usize) {
        match self.jobs.get_mut(&job_id) {
            Some(job) => job.logs.push(index),
            None => {
                tracing::debug!(job_id, index, "holding record for job not yet seen");
                self.pending.entry(job_id).or_default().push(index);
            }
        }
    }

    fn process_job_info(&mut self, record: &JobInfoRecord) -> Result<()> {
        if self.jobs.contains_key(&record.jobid) {
            return Err(ReduceError::DuplicateEvent {
                event: SnakemakeEvent::JobInfo,
                job_id: Some(record.jobid),
            });
        }

        let mut job = JobInfo::from_record(record);
        if let Some(early) = self.pending.remove(&record.jobid) {
            tracing::debug!(
                job_id = record.jobid,
                count = early.len(),
                "attaching held records"
            );
            job.logs.extend(early);
        }
        self.jobs.insert(record.jobid, job);
        Ok(())
    }

    fn process_job_finished(&mut self, record: &JobFinishedRecord) -> Result<()> {
        let Some(job) = self.jobs.get_mut(&record.job_id) else {
            return Err(ReduceError::MissingJob {
                event: SnakemakeEvent::JobFinished,
                job_id: record.job_id,
            });
        };
        if job.finished.is_some() {
            return Err(ReduceError::DuplicateEvent {
                event: SnakemakeEvent::JobFinished,
                job_id: Some(record.job_id),
            });
        }
        job.finished = Some(record.base.created_dt());
        Ok(())
    }

    fn process_workflow_started(&mut self, record: &WorkflowStartedRecord) -> Result<()> {
        if self.workflow_id.is_some() {
            return Err(ReduceError::DuplicateEvent {
                event: SnakemakeEvent::WorkflowStarted,
                job_id: None,
            });
        }
        self.workflow_id = Some(record.workflow_id);
        if let Some(snakefile) = &record.snakefile {
            self.snakefile = Some(snakefile.clone());
        }
        Ok(())
    }

    fn process_rulegraph(&mut self, record: &RulegraphRecord) -> Result<()> {
        if self.rulegraph.is_some() {
            return Err(ReduceError::DuplicateEvent {
                event: SnakemakeEvent::Rulegraph,
                job_id: None,
            });
        }
        // A null payload leaves the graph unset.
        self.rulegraph = record.rulegraph.clone();
        Ok(())
    }

    pub fn job(&self, job_id: i64) -> Option<&JobInfo> {
        self.jobs.get(&job_id)
    }

    /// Records held for jobs whose `job_info` never arrived.
    pub fn pending_job_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.pending.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn pending_records(&self, job_id: i64) -> impl Iterator<Item = &Record> {
        self.pending
            .get(&job_id)
            .into_iter()
            .flatten()
            .filter_map(|&index| self.logs.get(index))
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }

    /// Time from run start to the given record.
    pub fn elapsed(&self, record: &Record) -> Option<chrono::Duration> {
        self.started.map(|started| record.created_dt() - started)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smklog_types::{JobStartedRecord, LoggingFinishedRecord, RecordBase, level};

    fn base(created: f64) -> RecordBase {
        RecordBase::new(level::INFO, None, created)
    }

    fn job_info(jobid: i64, created: f64) -> Record {
        JobInfoRecord {
            base: base(created),
            jobid,
            rule_name: "align".to_string(),
            threads: 2,
            input: None,
            output: None,
            log: None,
            benchmark: None,
            rule_msg: None,
            wildcards: None,
            reason: None,
            shellcmd: None,
            priority: None,
            resources: None,
        }
        .into()
    }

    fn job_started(jobs: &[i64], created: f64) -> Record {
        JobStartedRecord {
            base: base(created),
            jobs: jobs.to_vec(),
        }
        .into()
    }

    fn job_finished(job_id: i64, created: f64) -> Record {
        JobFinishedRecord {
            base: base(created),
            job_id,
        }
        .into()
    }

    #[test]
    fn test_started_comes_from_first_record() {
        let mut run = RunStatus::new();
        assert!(run.started.is_none());
        run.process(job_started(&[1], 10.0)).unwrap();
        run.process(job_info(1, 20.0)).unwrap();
        assert_eq!(run.started, Some(smklog_types::epoch_to_datetime(10.0)));
    }

    #[test]
    fn test_early_records_are_held_then_attached() {
        let mut run = RunStatus::new();
        run.process(job_started(&[1, 2], 1.0)).unwrap();
        assert_eq!(run.pending_job_ids(), vec![1, 2]);
        assert_eq!(run.pending_records(1).count(), 1);

        run.process(job_info(1, 2.0)).unwrap();
        assert_eq!(run.pending_job_ids(), vec![2]);
        assert_eq!(run.jobs[&1].logs, vec![0, 1]);
    }

    #[test]
    fn test_job_finished_sets_timestamp_once() {
        let mut run = RunStatus::new();
        run.process(job_info(5, 1.0)).unwrap();
        run.process(job_finished(5, 4.5)).unwrap();
        let job = run.job(5).unwrap();
        assert_eq!(job.duration(), Some(chrono::Duration::milliseconds(3500)));

        let err = run.process(job_finished(5, 6.0)).unwrap_err();
        assert_eq!(
            err,
            ReduceError::DuplicateEvent {
                event: SnakemakeEvent::JobFinished,
                job_id: Some(5),
            }
        );
        assert_eq!(run.logs.len(), 2);
    }

    #[test]
    fn test_rulegraph_after_null_payload_is_accepted() {
        let mut run = RunStatus::new();
        let graph = |created, rulegraph| -> Record {
            RulegraphRecord {
                base: base(created),
                rulegraph,
            }
            .into()
        };
        run.process(graph(1.0, None)).unwrap();
        assert_eq!(run.rulegraph, None);

        let mut payload = Map::new();
        payload.insert("nodes".to_string(), Value::Array(Vec::new()));
        run.process(graph(2.0, Some(payload.clone()))).unwrap();
        assert_eq!(run.rulegraph, Some(payload.clone()));
        assert_eq!(run.logs.len(), 2);

        let err = run.process(graph(3.0, Some(payload))).unwrap_err();
        assert_eq!(
            err,
            ReduceError::DuplicateEvent {
                event: SnakemakeEvent::Rulegraph,
                job_id: None,
            }
        );
    }

    #[test]
    fn test_logging_finished_marks_run_finished() {
        let mut run = RunStatus::new();
        run.process(job_info(1, 1.0)).unwrap();
        assert!(!run.is_finished());
        run.process(
            LoggingFinishedRecord {
                base: base(9.0),
            }
            .into(),
        )
        .unwrap();
        assert_eq!(run.finished, Some(smklog_types::epoch_to_datetime(9.0)));
        assert_eq!(
            run.elapsed(&run.logs[1]),
            Some(chrono::Duration::seconds(8))
        );
    }
}
