#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! KLV encoding and decoding primitives.
//!
//! This crate provides the byte-level codecs of the KLV metadata stack:
//! BER length octets, the ST 0601 fixed-point mapping, the ST 1201 IMAPB
//! mapping, microsecond time stamps, text repertoires, the 16-bit packet
//! checksum, and the dispatching [`decode::read_value`] /
//! [`encode::value_bytes`] pair which converts between raw value bytes and
//! the typed values of `klv-core`.
//!
//! All wire integers are big-endian. All APIs are based on byte slices and
//! synchronous semantics; stream tokenization lives in `klv-parser`.

pub mod ber;
pub mod checksum;
pub mod decode;
pub mod encode;
pub mod imapb;
pub mod mapped;
pub mod text;
pub mod timestamp;

pub use ber::MalformedLengthError;
pub use decode::{read_value, DecodeValueError};
pub use encode::{value_bytes, EncodeValueError};
pub use text::TextCodec;
