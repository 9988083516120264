//! # KLV-rs library
//!
//! This crate serves as a parent for the library crates of the KLV-rs
//! project, aggregating the modules you are likely to require when working
//! with MISB ST 0601 UAS Datalink metadata.
//! These modules are also available as crates which can be fetched
//! independently; they generally have the `klv-` prefix.
//!
//! ## Basic
//!
//! - For an idiomatic API to reading and manipulating UAS Datalink packets
//!   from files or other sources, see the [`object`] module
//!   ([`object::read_stream`] in particular).
//! - The [`core`] crate contains most of the data types the other crates
//!   rely on, including local tags ([`Tag`](klv_core::Tag)), Universal
//!   Labels ([`UniversalLabel`](klv_core::UniversalLabel)), and the typed
//!   value model ([`PrimitiveValue`](klv_core::PrimitiveValue)).
//! - The standard tag dictionaries are in [`dictionary_std`], which
//!   provides lazily loaded singletons queryable at run time along with
//!   tag constants in the [`tags`](klv_dictionary_std::tags) module.
//!
//! ## Advanced
//!
//! - The byte-level codecs (BER lengths, fixed-point mappings, time stamps,
//!   text repertoires, the packet checksum) live in [`encoding`].
//! - [`parser`] contains the mid-level abstractions for tokenizing KLV
//!   streams. It might only be truly needed if the `object` API is unfit
//!   or too inefficient for a certain task.

pub use klv_core as core;
pub use klv_dictionary_std as dictionary_std;
pub use klv_encoding as encoding;
pub use klv_object as object;
pub use klv_parser as parser;
