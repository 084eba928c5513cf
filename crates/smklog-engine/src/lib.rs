// Run reducer - folds an ordered record stream into workflow and job state.
// Sits between decoded records (types) and the viewers in the CLI layer.

pub mod error;
pub mod job;
pub mod run;

pub use error::{ReduceError, Result};
pub use job::{JobInfo, JobState};
pub use run::RunStatus;
