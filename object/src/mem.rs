//! This module contains the implementation for an in-memory local set.
//!
//! Children are held in decode order (insertion order for user-built sets)
//! and serialized back in the same order; consumers must not assume the
//! tags are sorted. A tag occurs at most once per set: putting an element
//! whose tag is already present replaces the value in place, keeping the
//! original position.

use std::fmt;
use std::io::Cursor;
use std::ops::{Deref, DerefMut};

use itertools::Itertools;
use klv_core::dictionary::{TagDictionary, TagEntry, ValueKind};
use klv_core::value::Buf;
use klv_core::{Element, Header, Tag, UniversalLabel, Value};
use klv_dictionary_std::{UAS_DATALINK_LS, UAS_LOCAL_SET};
use klv_encoding::checksum::Sum16;
use klv_encoding::{ber, decode, encode};
use klv_parser::read::{KeyLength, KlvReader};
use snafu::ResultExt;
use tracing::warn;

use crate::{EncodeValueSnafu, FramingSnafu, ReadError, WriteError};

/// A full in-memory KLV element, with nested sets represented in memory.
pub type InMemElement = Element<InMemLocalSet>;

/// A local set that is fully contained in memory.
///
/// The set knows the tag dictionary it was decoded with,
/// so re-parsing and reporting need no further context.
#[derive(Debug, Clone)]
pub struct InMemLocalSet {
    dict: &'static dyn TagDictionary,
    entries: Vec<InMemElement>,
}

impl PartialEq for InMemLocalSet {
    // This implementation ignores the dictionary.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl InMemLocalSet {
    /// Create an empty set backed by the given dictionary.
    pub fn new_empty(dict: &'static dyn TagDictionary) -> Self {
        InMemLocalSet {
            dict,
            entries: Vec::new(),
        }
    }

    /// Decode a set from its value bytes: a KLV stream with 1-byte keys.
    ///
    /// Unknown tags and elements whose registered conversion refuses its
    /// bytes are preserved as unknown elements (with a warning for the
    /// latter), so the set re-encodes to the input bytes. Framing errors
    /// inside the value are fatal for the whole set.
    pub fn from_value_bytes(
        dict: &'static dyn TagDictionary,
        value: &[u8],
    ) -> Result<Self, ReadError> {
        let mut set = InMemLocalSet::new_empty(dict);
        for triple in KlvReader::new(Cursor::new(value), KeyLength::Local) {
            let triple = triple.context(FramingSnafu)?;
            let tag = Tag(triple.key[0]);
            let value = match dict.entry(tag) {
                Some(entry) => match decode_child(entry, &triple.value) {
                    Ok(value) => value,
                    Err(e) => {
                        warn!(
                            set = dict.name(),
                            %tag,
                            error = %e,
                            "value construction failed, keeping element unknown"
                        );
                        Value::Unknown(Buf::from(&triple.value[..]))
                    }
                },
                None => Value::Unknown(Buf::from(&triple.value[..])),
            };
            set.put(Element::new(tag, value));
        }
        Ok(set)
    }

    /// The dictionary this set was decoded with.
    pub fn dictionary(&self) -> &'static dyn TagDictionary {
        self.dict
    }

    /// Retrieve the element with the given tag.
    pub fn element<T: Into<Tag>>(&self, tag: T) -> Option<&InMemElement> {
        let tag = tag.into();
        self.entries.iter().find(|e| e.tag() == tag)
    }

    /// Retrieve the element with the given tag mutably.
    pub fn element_mut<T: Into<Tag>>(&mut self, tag: T) -> Option<&mut InMemElement> {
        let tag = tag.into();
        self.entries.iter_mut().find(|e| e.tag() == tag)
    }

    /// Insert an element, replacing in place any element of the same tag.
    ///
    /// A replaced element keeps its original position in the set;
    /// a new tag is appended at the end.
    pub fn put(&mut self, elem: InMemElement) {
        match self.entries.iter_mut().find(|e| e.tag() == elem.tag()) {
            Some(slot) => *slot = elem,
            None => self.entries.push(elem),
        }
    }

    /// Remove and return the element with the given tag.
    pub fn remove<T: Into<Tag>>(&mut self, tag: T) -> Option<InMemElement> {
        let tag = tag.into();
        let index = self.entries.iter().position(|e| e.tag() == tag)?;
        Some(self.entries.remove(index))
    }

    /// Iterate over the elements in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, InMemElement> {
        self.entries.iter()
    }

    /// The number of child elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no children.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the set's value bytes:
    /// the concatenation of the children's KLV bytes in insertion order.
    pub fn value_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut out = Vec::new();
        for elem in &self.entries {
            write_element(elem, &mut out)?;
        }
        Ok(out)
    }
}

impl<'a> IntoIterator for &'a InMemLocalSet {
    type Item = &'a InMemElement;
    type IntoIter = std::slice::Iter<'a, InMemElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for InMemLocalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {{{}}}",
            self.dict.name(),
            self.entries.iter().map(|e| e.tag()).format(", ")
        )
    }
}

/// Decode a child element's value per its dictionary entry.
fn decode_child(entry: &TagEntry, data: &[u8]) -> Result<Value<InMemLocalSet>, ChildError> {
    match entry.kind {
        ValueKind::Set(child_dict) => {
            let set =
                InMemLocalSet::from_value_bytes(child_dict, data).map_err(ChildError::Nested)?;
            Ok(Value::Set(set))
        }
        ref kind => {
            let value = decode::read_value(kind, data).map_err(ChildError::Value)?;
            Ok(Value::Primitive(value))
        }
    }
}

/// A child decode failure; both cases degrade to an unknown element.
#[derive(Debug)]
enum ChildError {
    Value(decode::DecodeValueError),
    Nested(ReadError),
}

impl fmt::Display for ChildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildError::Value(e) => e.fmt(f),
            ChildError::Nested(e) => e.fmt(f),
        }
    }
}

/// Append one element's key, BER length and value bytes.
fn write_element(elem: &InMemElement, out: &mut Vec<u8>) -> Result<(), WriteError> {
    let value = match elem.value() {
        Value::Primitive(v) => {
            encode::value_bytes(v).context(EncodeValueSnafu { tag: elem.tag() })?
        }
        Value::Set(s) => s.value_bytes()?,
        Value::Unknown(bytes) => bytes.to_vec(),
    };
    out.push(elem.tag().0);
    out.extend_from_slice(&ber::encode(value.len()));
    out.extend_from_slice(&value);
    Ok(())
}

/// A top-level UAS Datalink Local Set packet that is fully contained
/// in memory.
///
/// Dereferences to [`InMemLocalSet`] for element access and mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct UasDatalinkSet {
    set: InMemLocalSet,
}

impl UasDatalinkSet {
    /// The Universal Label key of every UAS Datalink packet.
    pub fn universal_label() -> UniversalLabel {
        UAS_DATALINK_LS
    }

    /// Create an empty packet.
    pub fn new_empty() -> Self {
        UasDatalinkSet {
            set: InMemLocalSet::new_empty(&UAS_LOCAL_SET),
        }
    }

    /// Decode a packet from its value bytes
    /// (everything between the BER length and the next top-level key).
    pub fn from_value_bytes(value: &[u8]) -> Result<Self, ReadError> {
        let set = InMemLocalSet::from_value_bytes(&UAS_LOCAL_SET, value)?;
        Ok(UasDatalinkSet { set })
    }

    /// Encode the packet: Universal Label key, canonical BER length and
    /// the children in insertion order.
    ///
    /// The checksum child, if present, is recomputed over the emitted
    /// bytes before the packet is returned, so the output always verifies.
    /// No checksum element is inserted if the set does not carry one.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteError> {
        let mut children = Vec::new();
        let mut checksum_value_offset = None;
        for (index, elem) in self.set.iter().enumerate() {
            let start = children.len();
            write_element(elem, &mut children)?;
            if elem.is_checksum() {
                if index + 1 != self.set.len() {
                    warn!("checksum element is not the final child of the set");
                }
                let value_len = children.len() - start - 2;
                if value_len == 2 {
                    checksum_value_offset = Some(children.len() - 2);
                } else {
                    warn!(
                        length = value_len,
                        "checksum element does not hold 2 bytes, leaving it as stored"
                    );
                }
            }
        }

        let mut out = Vec::with_capacity(16 + 9 + children.len());
        out.extend_from_slice(UAS_DATALINK_LS.as_bytes());
        out.extend_from_slice(&ber::encode(children.len()));
        let header_len = out.len();
        out.extend_from_slice(&children);

        if let Some(offset) = checksum_value_offset {
            let covered = header_len + offset;
            let mut sum = Sum16::new();
            sum.update(&out[..covered]);
            let computed = sum.finish();
            out[covered] = (computed >> 8) as u8;
            out[covered + 1] = (computed & 0xFF) as u8;
        }
        Ok(out)
    }

    /// Render a debug tree of the packet's structure:
    /// one line per element, nested sets indented.
    pub fn structure(&self) -> String {
        let mut out = String::new();
        out.push_str(self.set.dictionary().name());
        out.push('\n');
        structure_of(&self.set, 1, &mut out);
        out
    }

    /// Project the packet into an ordered metadata report
    /// (see [`MetadataList`](crate::MetadataList)).
    pub fn metadata_list(&self) -> crate::MetadataList {
        crate::metadata::collect(&self.set)
    }
}

fn structure_of(set: &InMemLocalSet, depth: usize, out: &mut String) {
    use std::fmt::Write;
    for elem in set {
        for _ in 0..depth {
            out.push('\t');
        }
        let name = set
            .dictionary()
            .entry(elem.tag())
            .map(|e| e.name)
            .unwrap_or("Unknown");
        let _ = writeln!(out, "{} {} <{}>", elem.tag(), name, variant_of(elem.value()));
        if let Value::Set(child) = elem.value() {
            structure_of(child, depth + 1, out);
        }
    }
}

fn variant_of(value: &Value<InMemLocalSet>) -> &'static str {
    use klv_core::PrimitiveValue;
    match value {
        Value::Primitive(PrimitiveValue::Bytes(_)) => "bytes",
        Value::Primitive(PrimitiveValue::DateTime(_)) => "date-time",
        Value::Primitive(PrimitiveValue::Str(_)) => "string",
        Value::Primitive(PrimitiveValue::Integer(_)) => "integer",
        Value::Primitive(PrimitiveValue::Mapped(_)) => "mapped",
        Value::Primitive(PrimitiveValue::Enumerated(_)) => "enumeration",
        Value::Primitive(PrimitiveValue::Imapb(_)) => "imapb",
        Value::Primitive(PrimitiveValue::Location(_)) => "location",
        Value::Set(_) => "local set",
        Value::Unknown(_) => "unknown",
    }
}

impl Deref for UasDatalinkSet {
    type Target = InMemLocalSet;

    fn deref(&self) -> &Self::Target {
        &self.set
    }
}

impl DerefMut for UasDatalinkSet {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.set
    }
}

impl fmt::Display for UasDatalinkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.set.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_core::PrimitiveValue;

    #[test]
    fn decodes_children_in_order() {
        // time stamp, then mission id, then an unknown tag
        let value: &[u8] = &[
            0x02, 0x08, 0x00, 0x04, 0x60, 0x50, 0x58, 0x4E, 0x01, 0x80, //
            0x03, 0x0A, b'M', b'i', b's', b's', b'i', b'o', b'n', b' ', b'1', b'2', //
            0x6F, 0x02, 0xDE, 0xAD,
        ];
        let set = UasDatalinkSet::from_value_bytes(value).unwrap();
        let tags: Vec<Tag> = set.iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec![Tag(2), Tag(3), Tag(111)]);
        assert_eq!(
            set.element(Tag(3)).unwrap().value().to_string(),
            "Mission 12"
        );
        assert!(matches!(
            set.element(Tag(111)).unwrap().value(),
            Value::Unknown(_)
        ));
    }

    #[test]
    fn put_replaces_in_place() {
        let mut set = UasDatalinkSet::new_empty();
        set.put(Element::new(
            Tag(3),
            Value::Primitive(PrimitiveValue::Bytes(Buf::from(&b"a"[..]))),
        ));
        set.put(Element::new(
            Tag(5),
            Value::Primitive(PrimitiveValue::Bytes(Buf::from(&b"b"[..]))),
        ));
        set.put(Element::new(
            Tag(3),
            Value::Primitive(PrimitiveValue::Bytes(Buf::from(&b"c"[..]))),
        ));
        let tags: Vec<Tag> = set.iter().map(|e| e.tag()).collect();
        assert_eq!(tags, vec![Tag(3), Tag(5)]);
        assert_eq!(set.element(Tag(3)).unwrap().value().to_string(), "0x63");
    }

    #[test]
    fn remove_and_mutate_elements() {
        let value: &[u8] = &[0x03, 0x02, b'h', b'i', 0x41, 0x01, 0x02];
        let mut set = UasDatalinkSet::from_value_bytes(value).unwrap();
        let removed = set.remove(Tag(65)).unwrap();
        assert_eq!(removed.tag(), Tag(65));
        assert_eq!(set.len(), 1);

        let mission = set.element_mut(Tag(3)).unwrap();
        mission.set_value(Value::Primitive(PrimitiveValue::Bytes(Buf::from(
            &b"ho"[..],
        ))));
        assert_eq!(&set.to_bytes().unwrap()[17..], [0x03, 0x02, b'h', b'o']);
    }

    #[test]
    fn value_construction_error_degrades_to_unknown() {
        // tag 5 declares 2 mapped bytes; give it 3
        let value: &[u8] = &[0x05, 0x03, 0x71, 0xC2, 0x00];
        let set = UasDatalinkSet::from_value_bytes(value).unwrap();
        assert!(matches!(
            set.element(Tag(5)).unwrap().value(),
            Value::Unknown(_)
        ));
        // and the original bytes survive re-encoding (16 key + 1 length)
        let bytes = set.to_bytes().unwrap();
        assert_eq!(&bytes[17..], value);
    }

    #[test]
    fn truncated_child_is_a_framing_error() {
        let value: &[u8] = &[0x02, 0x08, 0x00, 0x04];
        assert!(matches!(
            UasDatalinkSet::from_value_bytes(value),
            Err(ReadError::Framing { .. })
        ));
    }

    #[test]
    fn encode_recomputes_the_checksum() {
        let value: &[u8] = &[
            0x03, 0x02, b'h', b'i', //
            0x01, 0x02, 0x00, 0x00, // stale checksum
        ];
        let set = UasDatalinkSet::from_value_bytes(value).unwrap();
        let bytes = set.to_bytes().unwrap();
        let computed = klv_encoding::checksum::packet_checksum(&bytes);
        let stored = (u16::from(bytes[bytes.len() - 2]) << 8) | u16::from(bytes[bytes.len() - 1]);
        assert_eq!(stored, computed);
        assert_ne!(stored, 0);
    }

    #[test]
    fn structure_names_the_children() {
        let value: &[u8] = &[
            0x02, 0x08, 0x00, 0x04, 0x60, 0x50, 0x58, 0x4E, 0x01, 0x80, //
            0x30, 0x03, 0x01, 0x01, 0x01,
        ];
        let set = UasDatalinkSet::from_value_bytes(value).unwrap();
        let tree = set.structure();
        assert!(tree.starts_with("UAS Datalink Local Set\n"));
        assert!(tree.contains("Tag(2) Precision Time Stamp <date-time>"));
        assert!(tree.contains("Tag(48) Security Local Metadata Set <local set>"));
        assert!(tree.contains("\t\tTag(1) Security Classification <enumeration>"));
    }

    #[test]
    fn display_lists_the_tags() {
        let value: &[u8] = &[0x03, 0x02, b'h', b'i', 0x01, 0x02, 0x00, 0x00];
        let set = UasDatalinkSet::from_value_bytes(value).unwrap();
        assert_eq!(
            set.to_string(),
            "UAS Datalink Local Set {Tag(3), Tag(1)}"
        );
    }
}
