#![crate_type = "lib"]
#![deny(trivial_casts, trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    unused_import_braces
)]

//! This is the core KLV library, containing the concepts, data structures
//! and traits specific to SMPTE ST 336 Key-Length-Value metadata content,
//! as profiled by the MISB ST 0601 UAS Datalink Local Set.
//!
//! The crate is deliberately free of any I/O or byte-level codec logic:
//! it defines local tags and Universal Labels ([`Tag`], [`UniversalLabel`]),
//! the element composite ([`Element`]), the typed value variants
//! ([`PrimitiveValue`], [`Value`]), and the tag dictionary model
//! ([`dictionary::TagEntry`], [`dictionary::TagDictionary`]).
//! Decoding and encoding of raw bytes lives in `klv-encoding`,
//! stream tokenization in `klv-parser`,
//! and the in-memory set representation in `klv-object`.

pub mod dictionary;
pub mod header;
pub mod value;

pub use dictionary::{TagDictionary, TagEntry, TagIndex, UlIndex, ValueKind};
pub use header::{Element, Header, Tag, UniversalLabel};
pub use value::{PrimitiveValue, TextEncoding, Value};
