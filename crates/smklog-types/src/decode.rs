use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clock::Clock;
use crate::error::{DecodeError, Result};
use crate::record::{
    json_type_name, level, Record, RecordBase, RecordCategory, RecordKind,
};
use crate::registry::registry;

/// Keys written for transport only; they are not part of any variant.
pub const TRANSPORT_KEYS: &[&str] = &["type", "event", "levelname"];

/// Header values a variant falls back to when the key is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BaseDefaults {
    pub levelno: Option<i64>,
    pub message: Option<&'static str>,
}

impl BaseDefaults {
    pub const NONE: BaseDefaults = BaseDefaults {
        levelno: None,
        message: None,
    };

    /// Header for a freshly created record of this variant.
    pub fn base(&self, clock: &dyn Clock) -> RecordBase {
        RecordBase::now(
            clock,
            self.levelno.unwrap_or(level::INFO),
            self.message.map(str::to_string),
        )
    }
}

/// Consumes the fields of one raw object while a variant reads itself.
///
/// Every successful read removes the key; [`FieldReader::finish`] then
/// rejects whatever is left over.
#[derive(Debug)]
pub struct FieldReader {
    kind: RecordKind,
    fields: Map<String, Value>,
}

impl FieldReader {
    pub fn new(kind: RecordKind, fields: Map<String, Value>) -> Self {
        Self { kind, fields }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Key must be present and convert to `T`.
    pub fn required<T: DeserializeOwned>(&mut self, field: &str) -> Result<T> {
        match self.fields.remove(field) {
            Some(value) => convert(field, value),
            None => Err(DecodeError::MissingField {
                field: field.to_string(),
            }),
        }
    }

    /// Key must be present but may be `null`.
    pub fn nullable<T: DeserializeOwned>(&mut self, field: &str) -> Result<Option<T>> {
        match self.fields.remove(field) {
            Some(Value::Null) => Ok(None),
            Some(value) => convert(field, value).map(Some),
            None => Err(DecodeError::MissingField {
                field: field.to_string(),
            }),
        }
    }

    /// Absent and `null` both read as `None`.
    pub fn optional<T: DeserializeOwned>(&mut self, field: &str) -> Result<Option<T>> {
        match self.fields.remove(field) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => convert(field, value).map(Some),
        }
    }

    /// Read the common header.
    ///
    /// `created` is always required: a decoded record never gets a timestamp
    /// from the reading process.
    pub fn base(&mut self, defaults: BaseDefaults) -> Result<RecordBase> {
        let message = match defaults.message {
            Some(default) if !self.fields.contains_key("message") => Some(default.to_string()),
            _ => self.nullable("message")?,
        };
        let levelno = match defaults.levelno {
            Some(default) if !self.fields.contains_key("levelno") => default,
            _ => self.required("levelno")?,
        };

        Ok(RecordBase {
            message,
            levelno,
            created: self.required("created")?,
            exc_info: self.optional("exc_info")?,
        })
    }

    /// Fail on the first key no variant field consumed.
    pub fn finish(self) -> Result<()> {
        match self.fields.keys().next() {
            Some(field) => Err(DecodeError::UnknownField {
                kind: self.kind,
                field: field.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn convert<T: DeserializeOwned>(field: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|err| DecodeError::InvalidField {
        field: field.to_string(),
        reason: err.to_string(),
    })
}

/// Resolve the registry key from the `type` and `event` keys, removing both.
fn take_kind(fields: &mut Map<String, Value>) -> Result<RecordKind> {
    let category = match fields.remove("type") {
        None => {
            return Err(DecodeError::MissingField {
                field: "type".to_string(),
            });
        }
        Some(Value::String(value)) => value
            .parse::<RecordCategory>()
            .map_err(|_| DecodeError::InvalidCategory {
                value: format!("{:?}", value),
            })?,
        Some(other) => {
            return Err(DecodeError::InvalidCategory {
                value: other.to_string(),
            });
        }
    };

    if category == RecordCategory::Standard {
        return Ok(RecordKind::Standard);
    }

    let event = match fields.remove("event") {
        None => {
            return Err(DecodeError::MissingField {
                field: "event".to_string(),
            });
        }
        Some(Value::String(event)) => event,
        Some(other) => {
            return Err(DecodeError::InvalidField {
                field: "event".to_string(),
                reason: format!("expected a string, found {}", json_type_name(&other)),
            });
        }
    };

    RecordKind::from_parts(category, Some(&event))
        .map_err(|_| DecodeError::UnknownEvent { category, value: event })
}

/// Decode one raw object into a typed record.
pub fn decode_record(mut fields: Map<String, Value>) -> Result<Record> {
    let kind = take_kind(&mut fields)?;
    for key in TRANSPORT_KEYS {
        fields.remove(*key);
    }

    let Some(entry) = registry().get(kind) else {
        return Err(DecodeError::UnknownEvent {
            category: kind.category(),
            value: kind.event().unwrap_or_default().to_string(),
        });
    };

    let mut reader = FieldReader::new(kind, fields);
    let record = (entry.decode)(&mut reader)?;
    reader.finish()?;
    Ok(record)
}
