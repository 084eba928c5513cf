//! Example records, one of each variant.
//!
//! Levels and timestamps cycle per record so that round-trip tests cover
//! more than one header shape.

use serde_json::{Map, Value, json};
use smklog_types::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use uuid::Uuid;

pub const RANDOM_TIMESTAMP: f64 = 1759974850.185749;

const LEVELS: [i64; 4] = [level::DEBUG, level::INFO, level::WARNING, level::ERROR];

/// Hands out record headers with cycling level and increasing timestamp.
#[derive(Debug, Default)]
pub struct RecordFactory {
    i: usize,
}

impl RecordFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base(&mut self, message: &str) -> RecordBase {
        let base = RecordBase::new(
            LEVELS[self.i % LEVELS.len()],
            Some(message.to_string()),
            RANDOM_TIMESTAMP + self.i as f64 * 5.13917,
        );
        self.i += 1;
        base
    }

    pub fn base_with_level(&mut self, levelno: i64, message: &str) -> RecordBase {
        let mut base = self.base(message);
        base.levelno = levelno;
        base
    }
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// One record of each Snakemake variant.
pub fn example_records_snakemake() -> Vec<Record> {
    let mut factory = RecordFactory::new();

    vec![
        ErrorRecord {
            base: factory.base("Test Error"),
            exception: Some("some error".to_string()),
            location: Some("somewhere".to_string()),
            rule: Some("rule_name".to_string()),
            traceback: None,
            file: Some("script.py".to_string()),
            line: Some("123".to_string()),
        }
        .into(),
        WorkflowStartedRecord {
            base: factory.base("Test WorkflowStarted"),
            workflow_id: Uuid::parse_str("f0915278-1f9d-4cc8-a2b3-f23c3649c7e4")
                .unwrap_or_default(),
            snakefile: Some(PathBuf::from("/path/to/snakefile")),
        }
        .into(),
        JobInfoRecord {
            base: factory.base("Test JobInfo"),
            jobid: 123,
            rule_name: "rule_name".to_string(),
            threads: 4,
            input: Some(vec!["in/file1".to_string(), "in/file2".to_string()]),
            output: Some(vec!["out/file3".to_string()]),
            log: None,
            benchmark: None,
            rule_msg: None,
            wildcards: Some(object(json!({"foo": "1"}))),
            reason: Some("Missing output files: out/file3".to_string()),
            shellcmd: None,
            priority: Some(0),
            resources: Some(json!({"mem_mb": 1000, "tmpdir": "/tmp"})),
        }
        .into(),
        JobStartedRecord {
            base: factory.base("Test JobStarted"),
            jobs: vec![1, 2, 3],
        }
        .into(),
        JobFinishedRecord {
            base: factory.base("Test JobFinished"),
            job_id: 123,
        }
        .into(),
        ShellCmdRecord {
            base: factory.base("Test ShellCmd"),
            jobid: Some(123),
            shellcmd: Some("echo hello".to_string()),
            rule_name: Some("some_rule".to_string()),
        }
        .into(),
        JobErrorRecord {
            base: factory.base("Test JobError"),
            jobid: 123,
        }
        .into(),
        GroupInfoRecord {
            base: factory.base("Test GroupInfo"),
            group_id: 123,
            jobs: vec![json!(56), json!(78)],
        }
        .into(),
        GroupErrorRecord {
            base: factory.base("Test GroupError"),
            groupid: 123,
            aux_logs: vec![json!("one"), json!("two")],
            job_error_info: Map::new(),
        }
        .into(),
        ResourcesInfoRecord {
            base: factory.base("Test ResourcesInfo"),
            nodes: None,
            cores: Some(10),
            provided_resources: None,
        }
        .into(),
        DebugDagRecord {
            base: factory.base("Test DebugDag"),
            status: Some("status".to_string()),
            job: Some(json!(123)),
            file: Some("file.py".to_string()),
            exception: Some("some error".to_string()),
        }
        .into(),
        ProgressRecord {
            base: factory.base("Test Progress"),
            done: 34,
            total: 56,
        }
        .into(),
        RulegraphRecord {
            base: factory.base("Test Rulegraph"),
            rulegraph: Some(object(json!({
                "nodes": [{"rule": "all"}, {"rule": "align"}],
                "links": [[1, 0]],
            }))),
        }
        .into(),
        RunInfoRecord {
            base: factory.base("Test RunInfo"),
            stats: BTreeMap::from([("align".to_string(), 2), ("total".to_string(), 3)]),
        }
        .into(),
    ]
}

/// One record of each meta variant.
pub fn example_records_meta() -> Vec<Record> {
    let mut factory = RecordFactory::new();

    vec![
        LoggingStartedRecord {
            base: factory.base_with_level(level::INFO, "JSON logging plugin initialized"),
            pid: 1234,
            proc_started: Some(RANDOM_TIMESTAMP),
        }
        .into(),
        LoggingFinishedRecord {
            base: factory.base_with_level(level::INFO, "JSON logging finished"),
        }
        .into(),
        FormattingErrorRecord {
            base: factory
                .base_with_level(level::ERROR, "Error converting log record to JSON")
                .with_exc_info(ExceptionInfo::new("bad attr", "ValueError")),
            record_partial: object(json!({"foo": "bar"})),
            exception: Some(ExceptionInfo::new("bad attr", "ValueError")),
        }
        .into(),
    ]
}

/// One standard record per named level, plus one with no message.
pub fn example_records_standard() -> Vec<Record> {
    let mut factory = RecordFactory::new();

    let mut records: Vec<Record> = LEVELS
        .iter()
        .map(|&levelno| {
            StandardRecord::new(factory.base_with_level(levelno, &format!("test {}", levelno)))
                .into()
        })
        .collect();

    let mut silent = factory.base_with_level(level::NOTSET, "");
    silent.message = None;
    records.push(StandardRecord::new(silent).into());
    records
}

/// Every example record: standard, then Snakemake, then meta.
pub fn example_records() -> Vec<Record> {
    let mut records = example_records_standard();
    records.extend(example_records_snakemake());
    records.extend(example_records_meta());
    records
}
