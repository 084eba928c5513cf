pub mod base;
pub mod tag;
pub mod variants;

pub use base::*;
pub use tag::*;
pub use variants::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::decode::decode_record;
use crate::registry::registry;

/// Apply one expression to the inner struct of whichever variant `$record` is.
macro_rules! dispatch {
    ($record:expr, $inner:ident => $body:expr) => {
        match $record {
            Record::Standard($inner) => $body,
            Record::LoggingStarted($inner) => $body,
            Record::LoggingFinished($inner) => $body,
            Record::FormattingError($inner) => $body,
            Record::Error($inner) => $body,
            Record::WorkflowStarted($inner) => $body,
            Record::JobInfo($inner) => $body,
            Record::JobStarted($inner) => $body,
            Record::JobFinished($inner) => $body,
            Record::ShellCmd($inner) => $body,
            Record::JobError($inner) => $body,
            Record::GroupInfo($inner) => $body,
            Record::GroupError($inner) => $body,
            Record::ResourcesInfo($inner) => $body,
            Record::DebugDag($inner) => $body,
            Record::Progress($inner) => $body,
            Record::Rulegraph($inner) => $body,
            Record::RunInfo($inner) => $body,
        }
    };
}

/// One log entry from the closed variant set.
///
/// Equality is structural. Serializing produces the persisted object form
/// (`type`, `event`, `levelname`, header, then variant fields); deserializing
/// runs the strict decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Standard(StandardRecord),

    // Meta
    LoggingStarted(LoggingStartedRecord),
    LoggingFinished(LoggingFinishedRecord),
    FormattingError(FormattingErrorRecord),

    // Snakemake
    Error(ErrorRecord),
    WorkflowStarted(WorkflowStartedRecord),
    JobInfo(JobInfoRecord),
    JobStarted(JobStartedRecord),
    JobFinished(JobFinishedRecord),
    ShellCmd(ShellCmdRecord),
    JobError(JobErrorRecord),
    GroupInfo(GroupInfoRecord),
    GroupError(GroupErrorRecord),
    ResourcesInfo(ResourcesInfoRecord),
    DebugDag(DebugDagRecord),
    Progress(ProgressRecord),
    Rulegraph(RulegraphRecord),
    RunInfo(RunInfoRecord),
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),+ $(,)?) => {
        $(
            impl From<$ty> for Record {
                fn from(record: $ty) -> Self {
                    Record::$variant(record)
                }
            }
        )+
    };
}

impl_from_variant!(
    Standard(StandardRecord),
    LoggingStarted(LoggingStartedRecord),
    LoggingFinished(LoggingFinishedRecord),
    FormattingError(FormattingErrorRecord),
    Error(ErrorRecord),
    WorkflowStarted(WorkflowStartedRecord),
    JobInfo(JobInfoRecord),
    JobStarted(JobStartedRecord),
    JobFinished(JobFinishedRecord),
    ShellCmd(ShellCmdRecord),
    JobError(JobErrorRecord),
    GroupInfo(GroupInfoRecord),
    GroupError(GroupErrorRecord),
    ResourcesInfo(ResourcesInfoRecord),
    DebugDag(DebugDagRecord),
    Progress(ProgressRecord),
    Rulegraph(RulegraphRecord),
    RunInfo(RunInfoRecord),
);

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Standard(_) => StandardRecord::KIND,
            Record::LoggingStarted(_) => LoggingStartedRecord::KIND,
            Record::LoggingFinished(_) => LoggingFinishedRecord::KIND,
            Record::FormattingError(_) => FormattingErrorRecord::KIND,
            Record::Error(_) => ErrorRecord::KIND,
            Record::WorkflowStarted(_) => WorkflowStartedRecord::KIND,
            Record::JobInfo(_) => JobInfoRecord::KIND,
            Record::JobStarted(_) => JobStartedRecord::KIND,
            Record::JobFinished(_) => JobFinishedRecord::KIND,
            Record::ShellCmd(_) => ShellCmdRecord::KIND,
            Record::JobError(_) => JobErrorRecord::KIND,
            Record::GroupInfo(_) => GroupInfoRecord::KIND,
            Record::GroupError(_) => GroupErrorRecord::KIND,
            Record::ResourcesInfo(_) => ResourcesInfoRecord::KIND,
            Record::DebugDag(_) => DebugDagRecord::KIND,
            Record::Progress(_) => ProgressRecord::KIND,
            Record::Rulegraph(_) => RulegraphRecord::KIND,
            Record::RunInfo(_) => RunInfoRecord::KIND,
        }
    }

    pub fn category(&self) -> RecordCategory {
        self.kind().category()
    }

    /// Event tag string, `None` for standard records.
    pub fn event(&self) -> Option<&'static str> {
        self.kind().event()
    }

    pub fn is_snakemake(&self) -> bool {
        self.category() == RecordCategory::Snakemake
    }

    pub fn base(&self) -> &RecordBase {
        dispatch!(self, r => &r.base)
    }

    pub fn base_mut(&mut self) -> &mut RecordBase {
        dispatch!(self, r => &mut r.base)
    }

    pub fn message(&self) -> Option<&str> {
        self.base().message.as_deref()
    }

    pub fn levelno(&self) -> i64 {
        self.base().levelno
    }

    pub fn levelname(&self) -> String {
        self.base().levelname()
    }

    pub fn created(&self) -> f64 {
        self.base().created
    }

    pub fn created_dt(&self) -> DateTime<Utc> {
        self.base().created_dt()
    }

    pub fn exc_info(&self) -> Option<&ExceptionInfo> {
        self.base().exc_info.as_ref()
    }

    /// Job IDs this record refers to.
    pub fn associated_jobs(&self) -> Vec<i64> {
        match self {
            Record::JobInfo(r) => vec![r.jobid],
            Record::JobStarted(r) => r.jobs.clone(),
            Record::JobFinished(r) => vec![r.job_id],
            Record::ShellCmd(r) => r.jobid.into_iter().collect(),
            Record::JobError(r) => vec![r.jobid],
            // Group membership lists are untyped; only integer members are job IDs.
            Record::GroupInfo(r) => r.jobs.iter().filter_map(Value::as_i64).collect(),
            _ => Vec::new(),
        }
    }

    /// Persisted object form of this record.
    pub fn to_json_map(&self) -> serde_json::Result<Map<String, Value>> {
        let kind = self.kind();
        let mut map = Map::new();
        map.insert("type".to_string(), Value::from(kind.category().as_str()));
        if let Some(event) = kind.event() {
            map.insert("event".to_string(), Value::from(event));
        }
        // Only for human readers; the decoder discards it.
        map.insert(
            "levelname".to_string(),
            named_level(self.levelno()).map_or(Value::Null, Value::from),
        );

        let body = dispatch!(self, r => serde_json::to_value(r)?);
        if let Value::Object(fields) = body {
            map.extend(fields);
        }
        Ok(map)
    }

    /// Variant-specific fields in declaration order, header excluded.
    pub fn extra_fields(&self) -> Vec<(&'static str, Value)> {
        let Some(entry) = registry().get(self.kind()) else {
            return Vec::new();
        };
        let Ok(mut map) = self.to_json_map() else {
            return Vec::new();
        };
        entry
            .fields
            .iter()
            .map(|name| (*name, map.remove(*name).unwrap_or(Value::Null)))
            .collect()
    }

    /// Decode from a parsed JSON value.
    pub fn from_value(value: Value) -> crate::Result<Self> {
        match value {
            Value::Object(map) => decode_record(map),
            other => Err(crate::DecodeError::NotAnObject {
                found: json_type_name(&other).to_string(),
            }),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json_map()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        decode_record(map).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job_started(jobs: Vec<i64>) -> Record {
        JobStartedRecord {
            base: RecordBase::new(level::INFO, Some("started".to_string()), 100.5),
            jobs,
        }
        .into()
    }

    #[test]
    fn test_json_map_key_order() {
        let map = job_started(vec![1, 2]).to_json_map().unwrap();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["type", "event", "levelname", "message", "levelno", "created", "jobs"]
        );
        assert_eq!(map["levelname"], json!("INFO"));
    }

    #[test]
    fn test_unnamed_level_writes_null_levelname() {
        let record: Record = StandardRecord::new(RecordBase::new(5, None, 1.0)).into();
        let map = record.to_json_map().unwrap();
        assert_eq!(map["levelname"], Value::Null);
        assert!(!map.contains_key("event"));
        assert!(!map.contains_key("exc_info"));
    }

    #[test]
    fn test_associated_jobs() {
        assert_eq!(job_started(vec![3, 4]).associated_jobs(), vec![3, 4]);

        let group: Record = GroupInfoRecord {
            base: RecordBase::new(level::INFO, None, 1.0),
            group_id: 9,
            jobs: vec![json!(56), json!("not-a-job"), json!(78)],
        }
        .into();
        assert_eq!(group.associated_jobs(), vec![56, 78]);

        let shell: Record = ShellCmdRecord {
            base: RecordBase::new(level::INFO, None, 1.0),
            jobid: None,
            shellcmd: Some("echo".to_string()),
            rule_name: None,
        }
        .into();
        assert!(shell.associated_jobs().is_empty());
    }

    #[test]
    fn test_extra_fields_follow_declaration_order() {
        let record: Record = ProgressRecord {
            base: RecordBase::new(level::INFO, None, 1.0),
            done: 3,
            total: 7,
        }
        .into();
        assert_eq!(
            record.extra_fields(),
            vec![("done", json!(3)), ("total", json!(7))]
        );
    }

    #[test]
    fn test_from_value_rejects_non_objects() {
        let err = Record::from_value(json!([1, 2])).unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON object, found an array");
    }
}
