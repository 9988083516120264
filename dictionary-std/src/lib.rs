#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]
//! The standard MISB tag dictionaries:
//! the ST 0601 UAS Datalink Local Set and the ST 0102 Security Local Set
//! nested under its tag 48.
//!
//! The dictionaries are declared as static entry tables (see [`entries`])
//! and indexed into process-wide registries on first use.
//! The registries are write-once: they are populated during initialization
//! and observed as immutable afterwards.
//! Code which needs its own tag tables can build a
//! [`TagIndex`](klv_core::dictionary::TagIndex) instead
//! and register it in a custom [`UlIndex`](klv_core::dictionary::UlIndex).

pub mod entries;
pub mod tags;

use klv_core::dictionary::{TagDictionary, TagEntry, TagIndex, UlIndex};
use klv_core::{Tag, UniversalLabel};
use once_cell::sync::Lazy;

/// The Universal Label key of the UAS Datalink Local Set.
pub const UAS_DATALINK_LS: UniversalLabel = UniversalLabel::new([
    0x06, 0x0E, 0x2B, 0x34, 0x02, 0x0B, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x01, 0x01, 0x00, 0x00, 0x00,
]);

static UAS_REGISTRY: Lazy<TagIndex> =
    Lazy::new(|| TagIndex::from_entries("UAS Datalink Local Set", entries::UAS_DATALINK));

static SECURITY_REGISTRY: Lazy<TagIndex> =
    Lazy::new(|| TagIndex::from_entries("Security Local Metadata Set", entries::SECURITY));

static UL_REGISTRY: Lazy<UlIndex> = Lazy::new(|| {
    let mut index = UlIndex::new();
    index.register(UAS_DATALINK_LS, &UAS_LOCAL_SET);
    index
});

/// Retrieve a singleton instance of the UAS Datalink tag registry.
///
/// Note that one does not generally have to call this:
/// the unit type [`UasDatalinkDictionary`] already provides
/// a lazily loaded singleton implementing the necessary traits.
#[inline]
pub fn uas_registry() -> &'static TagIndex {
    &UAS_REGISTRY
}

/// Retrieve a singleton instance of the Security Local Set tag registry.
#[inline]
pub fn security_registry() -> &'static TagIndex {
    &SECURITY_REGISTRY
}

/// Retrieve the default top-level registry,
/// mapping the UAS Datalink Universal Label to its dictionary.
#[inline]
pub fn ul_registry() -> &'static UlIndex {
    &UL_REGISTRY
}

/// A tag dictionary which consults
/// the library's global UAS Datalink Local Set registry.
///
/// The registry is automatically initialized upon the first use.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UasDatalinkDictionary;

/// The static instance of [`UasDatalinkDictionary`]
/// registered in the default top-level registry.
pub static UAS_LOCAL_SET: UasDatalinkDictionary = UasDatalinkDictionary;

impl TagDictionary for UasDatalinkDictionary {
    fn name(&self) -> &'static str {
        "UAS Datalink Local Set"
    }

    fn entry(&self, tag: Tag) -> Option<&TagEntry> {
        uas_registry().entry(tag)
    }

    fn entry_by_name(&self, name: &str) -> Option<&TagEntry> {
        uas_registry().entry_by_name(name)
    }
}

/// A tag dictionary which consults
/// the library's global Security Local Set registry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SecurityDictionary;

/// The static instance of [`SecurityDictionary`]
/// referenced by UAS Datalink tag 48.
pub static SECURITY_LOCAL_SET: SecurityDictionary = SecurityDictionary;

impl TagDictionary for SecurityDictionary {
    fn name(&self) -> &'static str {
        "Security Local Metadata Set"
    }

    fn entry(&self, tag: Tag) -> Option<&TagEntry> {
        security_registry().entry(tag)
    }

    fn entry_by_name(&self, name: &str) -> Option<&TagEntry> {
        security_registry().entry_by_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_core::dictionary::ValueKind;

    #[test]
    fn uas_dictionary_covers_the_base_table() {
        for tag in 1..=65 {
            assert!(
                UasDatalinkDictionary.entry(Tag(tag)).is_some(),
                "missing UAS tag {}",
                tag
            );
        }
        // deprecated or unprofiled tags stay unknown
        assert!(UasDatalinkDictionary.entry(Tag(66)).is_none());
        assert!(UasDatalinkDictionary.entry(Tag(81)).is_none());
        assert!(UasDatalinkDictionary.entry(Tag(111)).is_none());
    }

    #[test]
    fn checksum_and_time_stamp_entries() {
        let checksum = UasDatalinkDictionary.entry(Tag(1)).unwrap();
        assert_eq!(checksum.name, "Checksum");
        assert!(matches!(checksum.kind, ValueKind::Bytes));

        let pts = UasDatalinkDictionary.entry(Tag(2)).unwrap();
        assert_eq!(pts.name, "Precision Time Stamp");
        assert!(matches!(pts.kind, ValueKind::DateTime));
    }

    #[test]
    fn heading_entry_parameters() {
        let heading = UasDatalinkDictionary.entry(Tag(5)).unwrap();
        match heading.kind {
            ValueKind::Mapped { domain, range } => {
                assert_eq!(domain, (0, 65535));
                assert_eq!(range, (0.0, 360.0));
            }
            ref other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn security_set_is_nested_under_tag_48() {
        let entry = UasDatalinkDictionary.entry(Tag(48)).unwrap();
        match entry.kind {
            ValueKind::Set(dict) => {
                assert_eq!(dict.name(), "Security Local Metadata Set");
                assert!(dict.entry(Tag(1)).is_some());
            }
            ref other => panic!("unexpected kind {:?}", other),
        }
    }

    #[test]
    fn security_dictionary_lookup() {
        let classification = SecurityDictionary.entry(Tag(1)).unwrap();
        assert_eq!(classification.name, "Security Classification");
        let version = SecurityDictionary.entry(Tag(22)).unwrap();
        assert!(matches!(
            version.kind,
            ValueKind::Integer {
                length: 2,
                signed: false
            }
        ));
        assert!(SecurityDictionary.entry(Tag(25)).is_none());
    }

    #[test]
    fn lookup_by_name() {
        let entry = UasDatalinkDictionary.entry_by_name("Sensor Latitude").unwrap();
        assert_eq!(entry.tag, Tag(13));
    }

    #[test]
    fn default_ul_registry_holds_the_uas_key() {
        let registry = ul_registry();
        assert_eq!(registry.len(), 1);
        let dict = registry.get(&UAS_DATALINK_LS).unwrap();
        assert_eq!(dict.name(), "UAS Datalink Local Set");
    }
}
