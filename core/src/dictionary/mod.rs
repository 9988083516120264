//! Core tag dictionary types.
//!
//! A *tag dictionary* maps the 1-byte local tags of a local set to
//! declarative [`TagEntry`] records describing how each element's value bytes
//! are interpreted. Dictionaries are consulted during decoding;
//! tags without an entry degrade gracefully to unknown elements.
//!
//! Two registry types are provided:
//! [`TagIndex`], a runtime-built dictionary used both for the standard
//! tables (populated once at library initialization) and for user-defined
//! sets; and [`UlIndex`], the top-level registry mapping 16-byte Universal
//! Labels to the dictionary of the corresponding set type.

use std::collections::HashMap;
use std::fmt;

use crate::header::{Tag, UniversalLabel};
use crate::value::TextEncoding;

/// A table of display symbols for an enumerated element,
/// indexed by the raw integer value.
pub type EnumSymbols = &'static [(u64, &'static str)];

/// The interpretation of an element's value bytes,
/// as declared by a dictionary entry.
#[derive(Clone, Copy)]
pub enum ValueKind {
    /// Opaque bytes.
    Bytes,
    /// 8-byte big-endian microseconds since the UNIX epoch, UTC.
    DateTime,
    /// Character string in the given repertoire.
    Text {
        /// character repertoire of the value bytes
        encoding: TextEncoding,
    },
    /// Big-endian integer of fixed byte length.
    Integer {
        /// wire byte length
        length: u8,
        /// two's complement when true
        signed: bool,
    },
    /// ST 0601 §8 linear fixed-point mapping.
    Mapped {
        /// raw integer domain `(x1, x2)`
        domain: (i64, i64),
        /// mapped real range `(y1, y2)`
        range: (f64, f64),
    },
    /// Integer index into a symbol table.
    Enumerated {
        /// wire byte length
        length: u8,
        /// index-to-symbol table
        symbols: EnumSymbols,
    },
    /// MISB ST 1201 IMAPB mapping; the byte length is taken from the wire.
    Imapb {
        /// mapped real range `(a, b)`
        range: (f64, f64),
    },
    /// Latitude/longitude/altitude triple of IMAPB values (10 bytes).
    Location,
    /// A nested local set, decoded recursively with the given dictionary.
    Set(&'static dyn TagDictionary),
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Bytes => f.write_str("Bytes"),
            ValueKind::DateTime => f.write_str("DateTime"),
            ValueKind::Text { encoding } => f.debug_struct("Text").field("encoding", encoding).finish(),
            ValueKind::Integer { length, signed } => f
                .debug_struct("Integer")
                .field("length", length)
                .field("signed", signed)
                .finish(),
            ValueKind::Mapped { domain, range } => f
                .debug_struct("Mapped")
                .field("domain", domain)
                .field("range", range)
                .finish(),
            ValueKind::Enumerated { length, .. } => {
                f.debug_struct("Enumerated").field("length", length).finish()
            }
            ValueKind::Imapb { range } => f.debug_struct("Imapb").field("range", range).finish(),
            ValueKind::Location => f.write_str("Location"),
            ValueKind::Set(dict) => f.debug_tuple("Set").field(&dict.name()).finish(),
        }
    }
}

/// The reporting descriptors of a UAS Datalink element:
/// the names under which the same quantity appears in the
/// ESD and UDS variants of the standard.
///
/// Entries without descriptors are excluded
/// from the metadata-list projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptors {
    /// Engineering Support Data name (may be empty)
    pub esd_name: &'static str,
    /// Universal Data Set name (may be empty)
    pub uds_name: &'static str,
}

/// A dictionary entry describing one local tag of a set.
#[derive(Debug, Clone, Copy)]
pub struct TagEntry {
    /// the local tag
    pub tag: Tag,
    /// the element's display name (the LDS name for ST 0601 tags)
    pub name: &'static str,
    /// reporting descriptors, when the standard declares them
    pub descriptors: Option<Descriptors>,
    /// unit of measure of the interpreted value, if any
    pub units: Option<&'static str>,
    /// how the value bytes are interpreted
    pub kind: ValueKind,
}

/// An index of known local tags backing a local set parser.
///
/// Implementations must behave as immutable after library initialization:
/// decoding threads observe them without synchronization.
pub trait TagDictionary: Send + Sync + fmt::Debug {
    /// The display name of the set this dictionary describes.
    fn name(&self) -> &'static str;

    /// Retrieve the entry registered for the given local tag.
    fn entry(&self, tag: Tag) -> Option<&TagEntry>;

    /// Retrieve the entry with the given display name.
    fn entry_by_name(&self, name: &str) -> Option<&TagEntry>;
}

/// A tag dictionary held in a hash map,
/// populated through [`register`](TagIndex::register).
///
/// This is the backing store of the standard dictionaries
/// (built once at initialization from their declarative entry tables)
/// and the building block for user-defined local sets.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    name: &'static str,
    by_tag: HashMap<Tag, TagEntry>,
}

impl TagIndex {
    /// Create an empty index for a set with the given display name.
    pub fn new(name: &'static str) -> Self {
        TagIndex {
            name,
            by_tag: HashMap::new(),
        }
    }

    /// Create an index pre-populated from a slice of entries.
    pub fn from_entries(name: &'static str, entries: &[TagEntry]) -> Self {
        let mut index = TagIndex {
            name,
            by_tag: HashMap::with_capacity(entries.len()),
        };
        for entry in entries {
            index.register(*entry);
        }
        index
    }

    /// Register a parser definition under its declared tag.
    ///
    /// Registration is idempotent per tag:
    /// the first definition wins and `false` is returned
    /// if an entry for the tag was already present.
    pub fn register(&mut self, entry: TagEntry) -> bool {
        use std::collections::hash_map::Entry;
        match self.by_tag.entry(entry.tag) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// The number of registered tags.
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    /// Whether no tags are registered.
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }
}

impl TagDictionary for TagIndex {
    fn name(&self) -> &'static str {
        self.name
    }

    fn entry(&self, tag: Tag) -> Option<&TagEntry> {
        self.by_tag.get(&tag)
    }

    fn entry_by_name(&self, name: &str) -> Option<&TagEntry> {
        self.by_tag.values().find(|e| e.name == name)
    }
}

/// The top-level registry mapping Universal Labels
/// to the dictionary of the registered set type.
///
/// A process-wide default instance, holding only the UAS Datalink Local Set,
/// is provided by the standard dictionary crate;
/// stream readers accept a custom instance for callers
/// which prefer per-instance registries.
#[derive(Clone, Default)]
pub struct UlIndex {
    by_key: HashMap<UniversalLabel, &'static dyn TagDictionary>,
}

impl UlIndex {
    /// Create an empty registry.
    pub fn new() -> Self {
        UlIndex::default()
    }

    /// Register a set dictionary under its Universal Label key.
    ///
    /// Registration is idempotent per key: the first dictionary wins and
    /// `false` is returned if the key was already registered.
    pub fn register(&mut self, key: UniversalLabel, dict: &'static dyn TagDictionary) -> bool {
        use std::collections::hash_map::Entry;
        match self.by_key.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(dict);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Retrieve the dictionary registered for the given Universal Label.
    pub fn get(&self, key: &UniversalLabel) -> Option<&'static dyn TagDictionary> {
        self.by_key.get(key).copied()
    }

    /// The number of registered Universal Labels.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Whether no Universal Labels are registered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

impl fmt::Debug for UlIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.by_key.iter().map(|(k, d)| (k, d.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: u8, name: &'static str) -> TagEntry {
        TagEntry {
            tag: Tag(tag),
            name,
            descriptors: None,
            units: None,
            kind: ValueKind::Bytes,
        }
    }

    #[test]
    fn registration_is_idempotent() {
        let mut index = TagIndex::new("Test Set");
        assert!(index.register(entry(1, "First")));
        assert!(!index.register(entry(1, "Duplicate")));
        assert_eq!(index.len(), 1);
        assert_eq!(index.entry(Tag(1)).map(|e| e.name), Some("First"));
    }

    #[test]
    fn lookup_by_name() {
        let index = TagIndex::from_entries("Test Set", &[entry(1, "First"), entry(2, "Second")]);
        assert_eq!(index.entry_by_name("Second").map(|e| e.tag), Some(Tag(2)));
        assert!(index.entry_by_name("Third").is_none());
    }

    #[test]
    fn ul_registration_is_idempotent() {
        static DICT: support::Dict = support::Dict;
        let key = UniversalLabel::new([0; 16]);
        let mut registry = UlIndex::new();
        assert!(registry.register(key, &DICT));
        assert!(!registry.register(key, &DICT));
        assert_eq!(registry.get(&key).map(|d| d.name()), Some("Test Set"));
    }

    mod support {
        use super::super::{Tag, TagDictionary, TagEntry};

        #[derive(Debug)]
        pub struct Dict;

        impl TagDictionary for Dict {
            fn name(&self) -> &'static str {
                "Test Set"
            }

            fn entry(&self, _tag: Tag) -> Option<&TagEntry> {
                None
            }

            fn entry_by_name(&self, _name: &str) -> Option<&TagEntry> {
                None
            }
        }
    }
}
