use std::collections::HashMap;
use std::sync::LazyLock;

use crate::decode::FieldReader;
use crate::error::{RegistryError, Result};
use crate::record::*;

/// Reads one variant from the fields of a raw object.
pub type DecodeFn = fn(&mut FieldReader) -> Result<Record>;

/// One row of the variant table.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub kind: RecordKind,
    pub name: &'static str,
    /// The variant's own fields, header excluded
    pub fields: &'static [&'static str],
    pub decode: DecodeFn,
}

fn decode_variant<V: RecordVariant>(fields: &mut FieldReader) -> Result<Record> {
    V::decode(fields).map(Into::into)
}

impl RegistryEntry {
    pub const fn of<V: RecordVariant>() -> Self {
        Self {
            kind: V::KIND,
            name: V::NAME,
            fields: V::FIELDS,
            decode: decode_variant::<V>,
        }
    }
}

/// Every concrete variant, in the order viewers list them.
pub static ENTRIES: &[RegistryEntry] = &[
    RegistryEntry::of::<StandardRecord>(),
    // Meta
    RegistryEntry::of::<LoggingStartedRecord>(),
    RegistryEntry::of::<LoggingFinishedRecord>(),
    RegistryEntry::of::<FormattingErrorRecord>(),
    // Snakemake
    RegistryEntry::of::<ErrorRecord>(),
    RegistryEntry::of::<WorkflowStartedRecord>(),
    RegistryEntry::of::<JobInfoRecord>(),
    RegistryEntry::of::<JobStartedRecord>(),
    RegistryEntry::of::<JobFinishedRecord>(),
    RegistryEntry::of::<ShellCmdRecord>(),
    RegistryEntry::of::<JobErrorRecord>(),
    RegistryEntry::of::<GroupInfoRecord>(),
    RegistryEntry::of::<GroupErrorRecord>(),
    RegistryEntry::of::<ResourcesInfoRecord>(),
    RegistryEntry::of::<DebugDagRecord>(),
    RegistryEntry::of::<ProgressRecord>(),
    RegistryEntry::of::<RulegraphRecord>(),
    RegistryEntry::of::<RunInfoRecord>(),
];

/// Lookup from registry key to table row.
#[derive(Debug)]
pub struct Registry {
    entries: &'static [RegistryEntry],
    by_kind: HashMap<RecordKind, usize>,
}

impl Registry {
    /// Index a table, rejecting two rows with the same key.
    pub fn build(entries: &'static [RegistryEntry]) -> std::result::Result<Self, RegistryError> {
        let mut by_kind = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            if let Some(previous) = by_kind.insert(entry.kind, index) {
                return Err(RegistryError::Duplicate {
                    kind: entry.kind,
                    first: entries[previous].name,
                    second: entry.name,
                });
            }
        }
        Ok(Self { entries, by_kind })
    }

    pub fn get(&self, kind: RecordKind) -> Option<&'static RegistryEntry> {
        let entries = self.entries;
        self.by_kind.get(&kind).map(|&index| &entries[index])
    }

    pub fn entries(&self) -> &'static [RegistryEntry] {
        self.entries
    }

    /// Registered variants of one category.
    pub fn in_category(
        &self,
        category: RecordCategory,
    ) -> impl Iterator<Item = &'static RegistryEntry> + use<> {
        self.entries
            .iter()
            .filter(move |entry| entry.kind.category() == category)
    }
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| match Registry::build(ENTRIES) {
    Ok(registry) => registry,
    Err(err) => panic!("invalid record registry: {}", err),
});

/// The process-wide variant registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Build the registry now so a bad table fails at startup, not mid-stream.
pub fn init() {
    LazyLock::force(&REGISTRY);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_is_registered() {
        init();
        assert!(registry().get(RecordKind::Standard).is_some());
        for event in MetaEvent::ALL {
            assert!(
                registry().get(RecordKind::Meta(*event)).is_some(),
                "meta event {} not registered",
                event
            );
        }
        for event in SnakemakeEvent::ALL {
            assert!(
                registry().get(RecordKind::Snakemake(*event)).is_some(),
                "snakemake event {} not registered",
                event
            );
        }
        assert_eq!(
            registry().entries().len(),
            1 + MetaEvent::ALL.len() + SnakemakeEvent::ALL.len()
        );
    }

    static DUPLICATED: &[RegistryEntry] = &[
        RegistryEntry::of::<ProgressRecord>(),
        RegistryEntry::of::<JobStartedRecord>(),
        RegistryEntry::of::<ProgressRecord>(),
    ];

    #[test]
    fn test_duplicate_registration_fails_to_build() {
        let err = Registry::build(DUPLICATED).unwrap_err();
        assert_eq!(
            err,
            RegistryError::Duplicate {
                kind: RecordKind::Snakemake(SnakemakeEvent::Progress),
                first: "Progress",
                second: "Progress",
            }
        );
    }

    #[test]
    fn test_category_listing() {
        let names: Vec<&str> = registry()
            .in_category(RecordCategory::Meta)
            .map(|entry| entry.name)
            .collect();
        assert_eq!(
            names,
            vec!["LoggingStarted", "LoggingFinished", "FormattingError"]
        );
    }
}
