#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! A mid-level abstraction for reading KLV content sequentially.
//!
//! [`read::KlvReader`] is the pull-based tokenizer of the stack:
//! it turns a readable byte source into a lazy, finite sequence of raw
//! key-length-value triples, with the key length parameterized
//! (16 bytes at the top level of a metadata elementary stream,
//! 1 byte inside a local set).
//!
//! [`stream::PacketReader`] drives a `KlvReader` over a top-level stream,
//! yielding whole packets together with the result of verifying their
//! trailing ST 0601 checksum element. Neither layer interprets values;
//! the typed model lives in `klv-object`.

pub mod read;
pub mod stream;

pub use read::{Error, KeyLength, KlvReader, RawKlv};
pub use stream::{ChecksumStatus, PacketReader, RawPacket};
