use serde::Serialize;
use serde_json::{Map, Value};
use smklog_types::{
    Clock, DecodeError, ExceptionInfo, Record, RecordCategory, RecordKind, SnakemakeEvent,
    decode_record, registry,
};

/// A structured log entry as handed over by the workflow engine.
///
/// Entries carry an optional event tag and a loose bag of attributes. They
/// become records through [`LogEntry::to_record`], which takes only the
/// attributes the tagged variant declares.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub message: Option<String>,
    pub levelno: i64,
    pub created: f64,
    pub exc_info: Option<ExceptionInfo>,
    pub event: Option<SnakemakeEvent>,
    pub attributes: Map<String, Value>,
}

impl LogEntry {
    pub fn new(levelno: i64, message: impl Into<String>, clock: &dyn Clock) -> Self {
        Self {
            message: Some(message.into()),
            levelno,
            created: clock.now(),
            exc_info: None,
            event: None,
            attributes: Map::new(),
        }
    }

    pub fn with_event(mut self, event: SnakemakeEvent) -> Self {
        self.event = Some(event);
        self
    }

    /// Attach an attribute. Values that cannot be represented as JSON are stored as `null`.
    pub fn with_attribute(mut self, name: &str, value: impl Serialize) -> Self {
        let value = serde_json::to_value(value).unwrap_or(Value::Null);
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn with_exc_info(mut self, exc_info: ExceptionInfo) -> Self {
        self.exc_info = Some(exc_info);
        self
    }

    pub fn kind(&self) -> RecordKind {
        match self.event {
            Some(event) => RecordKind::Snakemake(event),
            None => RecordKind::Standard,
        }
    }

    /// Header attributes, as far as they can be extracted.
    pub fn partial(&self) -> Map<String, Value> {
        let mut partial = Map::new();
        partial.insert(
            "message".to_string(),
            self.message.clone().map_or(Value::Null, Value::from),
        );
        partial.insert("levelno".to_string(), Value::from(self.levelno));
        partial.insert("created".to_string(), Value::from(self.created));
        if let Some(exc_info) = &self.exc_info
            && let Ok(value) = serde_json::to_value(exc_info)
        {
            partial.insert("exc_info".to_string(), value);
        }
        partial
    }

    /// Convert to the record variant selected by the event tag.
    pub fn to_record(&self) -> Result<Record, DecodeError> {
        let kind = self.kind();
        let mut fields = Map::new();
        fields.insert(
            "type".to_string(),
            Value::from(kind.category().as_str()),
        );
        if let Some(event) = kind.event() {
            fields.insert("event".to_string(), Value::from(event));
        }
        fields.extend(self.partial());

        if kind.category() != RecordCategory::Standard
            && let Some(entry) = registry().get(kind)
        {
            for name in entry.fields {
                if let Some(value) = self.attributes.get(*name) {
                    fields.insert(name.to_string(), value.clone());
                }
            }
        }

        decode_record(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smklog_types::{FixedClock, level};

    #[test]
    fn test_untagged_entry_is_standard() {
        let entry = LogEntry::new(level::WARNING, "careful", &FixedClock(3.5))
            .with_attribute("unrelated", 1);
        let record = entry.to_record().unwrap();
        assert!(matches!(record, Record::Standard(_)));
        assert_eq!(record.levelno(), level::WARNING);
        assert_eq!(record.created(), 3.5);
    }

    #[test]
    fn test_tagged_entry_takes_declared_fields_only() {
        let entry = LogEntry::new(level::INFO, "3 of 7 steps done", &FixedClock(1.0))
            .with_event(SnakemakeEvent::Progress)
            .with_attribute("done", 3)
            .with_attribute("total", 7)
            .with_attribute("rule", "ignored");
        let Record::Progress(progress) = entry.to_record().unwrap() else {
            panic!("expected progress record");
        };
        assert_eq!((progress.done, progress.total), (3, 7));
    }

    #[test]
    fn test_missing_required_attribute_fails() {
        let entry = LogEntry::new(level::INFO, "finished", &FixedClock(1.0))
            .with_event(SnakemakeEvent::JobFinished);
        let err = entry.to_record().unwrap_err();
        assert_eq!(err.to_string(), "missing required field `job_id`");
    }

    #[test]
    fn test_partial_holds_header() {
        let entry = LogEntry::new(level::ERROR, "boom", &FixedClock(2.0))
            .with_exc_info(ExceptionInfo::new("bad", "ValueError"));
        let partial = entry.partial();
        let keys: Vec<&str> = partial.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["message", "levelno", "created", "exc_info"]);
        assert_eq!(partial["exc_info"]["type"], "ValueError");
    }
}
