use smklog_engine::RunStatus;
use smklog_format::parse_logfile;
use std::path::Path;

use crate::error::{Error, Result};

/// A run read as far as it could be, with the error that stopped it.
#[derive(Debug)]
pub struct RunLoad {
    pub run: RunStatus,
    pub error: Option<Error>,
}

impl RunLoad {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<RunStatus> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.run),
        }
    }
}

/// Read and reduce a whole log file.
pub fn load_run(path: &Path) -> Result<RunStatus> {
    load_run_partial(path).into_result()
}

/// Read and reduce a log file, keeping everything accepted before the first error.
pub fn load_run_partial(path: &Path) -> RunLoad {
    let mut run = RunStatus::new();

    let reader = match parse_logfile(path) {
        Ok(reader) => reader,
        Err(err) => {
            return RunLoad {
                run,
                error: Some(err.into()),
            };
        }
    };

    for record in reader {
        let result = record
            .map_err(Error::from)
            .and_then(|record| run.process(record).map_err(Error::from));
        if let Err(err) = result {
            tracing::warn!(
                path = %path.display(),
                records = run.logs.len(),
                error = %err,
                "stopped reading log"
            );
            return RunLoad {
                run,
                error: Some(err),
            };
        }
    }

    tracing::debug!(
        path = %path.display(),
        records = run.logs.len(),
        jobs = run.jobs.len(),
        "loaded run"
    );
    RunLoad { run, error: None }
}
