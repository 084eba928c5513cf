use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// Numeric severity levels shared with the host logging system.
pub mod level {
    pub const NOTSET: i64 = 0;
    pub const DEBUG: i64 = 10;
    pub const INFO: i64 = 20;
    pub const WARNING: i64 = 30;
    pub const ERROR: i64 = 40;
    pub const CRITICAL: i64 = 50;

    /// Levels that have a name written alongside the number.
    pub const NAMED: [i64; 5] = [DEBUG, INFO, WARNING, ERROR, CRITICAL];
}

/// Name of one of the five named levels, `None` for any other number.
pub fn named_level(levelno: i64) -> Option<&'static str> {
    match levelno {
        level::DEBUG => Some("DEBUG"),
        level::INFO => Some("INFO"),
        level::WARNING => Some("WARNING"),
        level::ERROR => Some("ERROR"),
        level::CRITICAL => Some("CRITICAL"),
        _ => None,
    }
}

/// Display name for any level number (`Level 15` for unnamed ones).
pub fn level_name(levelno: i64) -> String {
    match named_level(levelno) {
        Some(name) => name.to_string(),
        None if levelno == level::NOTSET => "NOTSET".to_string(),
        None => format!("Level {}", levelno),
    }
}

/// Convert fractional epoch seconds to a UTC timestamp.
pub fn epoch_to_datetime(secs: f64) -> DateTime<Utc> {
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos).unwrap_or_default()
}

/// Information from a caught error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExceptionInfo {
    pub message: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ExceptionInfo {
    pub fn new(message: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            type_name: type_name.into(),
        }
    }

    /// Capture an error value: its display text and its type path.
    pub fn from_error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self {
            message: err.to_string(),
            type_name: std::any::type_name::<E>().to_string(),
        }
    }
}

/// Fields carried by every record variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordBase {
    /// Formatted log message
    pub message: Option<String>,

    /// Numeric level
    pub levelno: i64,

    /// Seconds since the epoch when the record was created
    pub created: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exc_info: Option<ExceptionInfo>,
}

impl RecordBase {
    pub const FIELDS: &'static [&'static str] = &["message", "levelno", "created", "exc_info"];

    pub fn new(levelno: i64, message: Option<String>, created: f64) -> Self {
        Self {
            message,
            levelno,
            created,
            exc_info: None,
        }
    }

    /// Base stamped with the clock's current time.
    pub fn now(clock: &dyn Clock, levelno: i64, message: Option<String>) -> Self {
        Self::new(levelno, message, clock.now())
    }

    pub fn with_exc_info(mut self, exc_info: ExceptionInfo) -> Self {
        self.exc_info = Some(exc_info);
        self
    }

    pub fn created_dt(&self) -> DateTime<Utc> {
        epoch_to_datetime(self.created)
    }

    pub fn levelname(&self) -> String {
        level_name(self.levelno)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_names() {
        assert_eq!(named_level(level::WARNING), Some("WARNING"));
        assert_eq!(named_level(level::NOTSET), None);
        assert_eq!(level_name(level::NOTSET), "NOTSET");
        assert_eq!(level_name(15), "Level 15");
        assert_eq!(level_name(level::CRITICAL), "CRITICAL");
    }

    #[test]
    fn test_epoch_conversion_keeps_subseconds() {
        let dt = epoch_to_datetime(1759974850.25);
        assert_eq!(dt.timestamp(), 1759974850);
        assert_eq!(dt.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_exception_info_from_error() {
        let err = std::io::Error::other("disk on fire");
        let info = ExceptionInfo::from_error(&err);
        assert_eq!(info.message, "disk on fire");
        assert!(info.type_name.ends_with("io::error::Error"));

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"type\":"));
    }

    #[test]
    fn test_exception_info_rejects_extra_keys() {
        let parsed = serde_json::from_str::<ExceptionInfo>(
            r#"{"message": "x", "type": "ValueError", "traceback": "..."}"#,
        );
        assert!(parsed.is_err());
    }
}
