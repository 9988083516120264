//! Exercises the public element and dictionary API from an external crate,
//! without direct access to dependency `smallvec`.

use klv_core::dictionary::{TagEntry, TagIndex, ValueKind};
use klv_core::header::EmptyObject;
use klv_core::value::{MappedParams, MappedValue, TextValue};
use klv_core::{Element, Header, PrimitiveValue, Tag, TagDictionary, TextEncoding, Value};

// nested sets are irrelevant here
type LeafElement = Element<EmptyObject>;

#[test]
fn build_and_inspect_an_element() {
    let value = TextValue::new(TextEncoding::Utf8, "Mission 12").unwrap();
    let elem: LeafElement = Element::new(Tag(3), Value::Primitive(PrimitiveValue::Str(value)));
    assert_eq!(elem.tag(), Tag(3));
    assert!(!elem.is_checksum());
    assert_eq!(elem.value().to_string(), "Mission 12");
}

#[test]
fn replace_an_element_value() {
    let params = MappedParams::new((0, 65535), (0.0, 360.0));
    let mut elem: LeafElement = Element::new(
        Tag(5),
        Value::Primitive(PrimitiveValue::Mapped(
            MappedValue::from_real(params, 159.974).unwrap(),
        )),
    );
    elem.set_value(Value::Primitive(PrimitiveValue::Mapped(
        MappedValue::from_real(params, 0.0).unwrap(),
    )));
    assert_eq!(elem.value().to_string(), "0");
}

#[test]
fn out_of_range_values_are_refused() {
    let params = MappedParams::new((0, 65535), (0.0, 360.0));
    assert!(MappedValue::from_real(params, -1.0).is_err());
    assert!(TextValue::new(TextEncoding::Iso646, "naïve").is_err());
}

#[test]
fn custom_dictionary_registration() {
    let mut index = TagIndex::new("My Local Set");
    let registered = index.register(TagEntry {
        tag: Tag(1),
        name: "Frame Counter",
        descriptors: None,
        units: None,
        kind: ValueKind::Integer {
            length: 4,
            signed: false,
        },
    });
    assert!(registered);
    // repeated registration is a no-op
    assert!(!index.register(TagEntry {
        tag: Tag(1),
        name: "Other",
        descriptors: None,
        units: None,
        kind: ValueKind::Bytes,
    }));
    assert_eq!(index.entry(Tag(1)).unwrap().name, "Frame Counter");
    assert_eq!(index.name(), "My Local Set");
}
