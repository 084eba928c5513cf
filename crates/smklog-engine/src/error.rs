use smklog_types::SnakemakeEvent;
use std::fmt;

/// Result type for smklog-engine operations
pub type Result<T> = std::result::Result<T, ReduceError>;

/// A record that is inconsistent with the state built so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReduceError {
    /// An event that may occur once (per job, or per run) occurred again
    DuplicateEvent {
        event: SnakemakeEvent,
        job_id: Option<i64>,
    },

    /// An event refers to a job whose `job_info` has not been seen
    MissingJob { event: SnakemakeEvent, job_id: i64 },
}

impl fmt::Display for ReduceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReduceError::DuplicateEvent {
                event,
                job_id: Some(job_id),
            } => write!(f, "Duplicate {} event for job {}", event, job_id),
            ReduceError::DuplicateEvent { event, job_id: None } => {
                write!(f, "Duplicate {} event", event)
            }
            ReduceError::MissingJob { event, job_id } => write!(
                f,
                "{} event before {} for job {}",
                event,
                SnakemakeEvent::JobInfo,
                job_id
            ),
        }
    }
}

impl std::error::Error for ReduceError {}
