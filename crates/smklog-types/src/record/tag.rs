use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownTag;

/// Declares a string-tagged enum with a fixed wire spelling per variant.
macro_rules! tag_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $tag:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Wire spelling of this tag.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $tag,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = UnknownTag;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($tag => Ok($name::$variant),)+
                    _ => Err(UnknownTag {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

tag_enum! {
    /// General category of a log record, written as the `type` key.
    pub enum RecordCategory {
        /// Plain log line from the host logging system.
        Standard => "standard",
        /// Information about the logging session itself.
        Meta => "meta",
        /// Structured Snakemake workflow event.
        Snakemake => "snakemake",
    }
}

tag_enum! {
    /// Event tags of the `meta` category.
    pub enum MetaEvent {
        LoggingStarted => "logging_started",
        LoggingFinished => "logging_finished",
        FormattingError => "formatting_error",
    }
}

tag_enum! {
    /// Event tags of the `snakemake` category.
    pub enum SnakemakeEvent {
        Error => "error",
        WorkflowStarted => "workflow_started",
        JobInfo => "job_info",
        JobStarted => "job_started",
        JobFinished => "job_finished",
        ShellCmd => "shellcmd",
        JobError => "job_error",
        GroupInfo => "group_info",
        GroupError => "group_error",
        ResourcesInfo => "resources_info",
        DebugDag => "debug_dag",
        Progress => "progress",
        Rulegraph => "rulegraph",
        RunInfo => "run_info",
    }
}

/// Registry key of a concrete record variant: its category plus, outside
/// `standard`, the event tag within that category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKind {
    Standard,
    Meta(MetaEvent),
    Snakemake(SnakemakeEvent),
}

impl RecordKind {
    pub fn category(&self) -> RecordCategory {
        match self {
            RecordKind::Standard => RecordCategory::Standard,
            RecordKind::Meta(_) => RecordCategory::Meta,
            RecordKind::Snakemake(_) => RecordCategory::Snakemake,
        }
    }

    /// Event tag as written in the `event` key, `None` for standard records.
    pub fn event(&self) -> Option<&'static str> {
        match self {
            RecordKind::Standard => None,
            RecordKind::Meta(event) => Some(event.as_str()),
            RecordKind::Snakemake(event) => Some(event.as_str()),
        }
    }

    /// Resolve an event string within a category.
    ///
    /// Meta and Snakemake events are looked up in disjoint sets, so a
    /// Snakemake tag under `meta` is rejected even though it is a known tag.
    pub fn from_parts(category: RecordCategory, event: Option<&str>) -> Result<Self, UnknownTag> {
        match (category, event) {
            (RecordCategory::Standard, _) => Ok(RecordKind::Standard),
            (RecordCategory::Meta, Some(event)) => event.parse().map(RecordKind::Meta),
            (RecordCategory::Snakemake, Some(event)) => event.parse().map(RecordKind::Snakemake),
            (_, None) => Err(UnknownTag {
                kind: "event",
                value: String::new(),
            }),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event() {
            Some(event) => write!(f, "{}/{}", self.category(), event),
            None => write!(f, "{}", self.category()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_parse_their_own_spelling() {
        for event in SnakemakeEvent::ALL {
            assert_eq!(event.as_str().parse::<SnakemakeEvent>().unwrap(), *event);
        }
        for event in MetaEvent::ALL {
            assert_eq!(event.as_str().parse::<MetaEvent>().unwrap(), *event);
        }
    }

    #[test]
    fn test_categories_are_disjoint() {
        let err = RecordKind::from_parts(RecordCategory::Meta, Some("job_info")).unwrap_err();
        assert_eq!(err.value, "job_info");

        let kind = RecordKind::from_parts(RecordCategory::Snakemake, Some("job_info")).unwrap();
        assert_eq!(kind, RecordKind::Snakemake(SnakemakeEvent::JobInfo));
        assert_eq!(kind.to_string(), "snakemake/job_info");
    }

    #[test]
    fn test_tag_serde_uses_wire_spelling() {
        let json = serde_json::to_string(&SnakemakeEvent::ShellCmd).unwrap();
        assert_eq!(json, "\"shellcmd\"");

        let parsed: RecordCategory = serde_json::from_str("\"meta\"").unwrap();
        assert_eq!(parsed, RecordCategory::Meta);
        assert!(serde_json::from_str::<RecordCategory>("\"Meta\"").is_err());
    }
}
