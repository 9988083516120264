#![deny(trivial_numeric_casts, unsafe_code, unstable_features)]
#![warn(
    missing_debug_implementations,
    unused_qualifications,
    unused_import_braces
)]
//! This crate contains a high-level abstraction for reading and manipulating
//! UAS Datalink metadata. At this level, a KLV packet is presented as an
//! in-memory tree of typed elements which can be inspected, modified and
//! re-encoded byte-exactly.
//!
//! # Reading a stream
//!
//! [`read_stream`] drives the lower layers over any readable byte source,
//! yielding one item per top-level packet:
//!
//! ```no_run
//! use klv_object::{read_stream, StreamItem};
//!
//! let file = std::fs::File::open("DynamicConstantMISMMS.bin")?;
//! for item in read_stream(file) {
//!     match item? {
//!         StreamItem::UasDatalink(packet) => println!("{}", packet.structure()),
//!         StreamItem::Set { key, .. } => println!("registered set under {}", key),
//!         StreamItem::Unknown { key, .. } => println!("unregistered key {}", key),
//!     }
//! }
//! # Result::<(), Box<dyn std::error::Error>>::Ok(())
//! ```
//!
//! Decoded packets round-trip: for a well-formed input packet,
//! [`UasDatalinkSet::to_bytes`](mem::UasDatalinkSet::to_bytes) returns
//! the original bytes, with the checksum element recomputed.

pub mod mem;
pub mod metadata;

use std::io::Read;

use klv_core::dictionary::UlIndex;
use klv_core::UniversalLabel;
use klv_dictionary_std::{ul_registry, UAS_DATALINK_LS};
use klv_parser::stream::PacketReader;
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::warn;

pub use mem::{InMemElement, InMemLocalSet, UasDatalinkSet};
pub use metadata::{MetadataList, MetadataRecord};

/// An error which occurs while reading KLV content into memory.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ReadError {
    /// A framing failure in the underlying byte stream.
    #[snafu(display("failed to frame KLV content"))]
    Framing {
        /// the tokenizer error
        source: klv_parser::read::Error,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

/// An error which occurs while encoding an in-memory set back to bytes.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum WriteError {
    /// A typed value refused to encode.
    #[snafu(display("failed to encode the value of {}", tag))]
    EncodeValue {
        /// the local tag of the offending element
        tag: klv_core::Tag,
        /// the value encoding error
        source: klv_encoding::EncodeValueError,
    },
}

/// One top-level item decoded from a KLV stream.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamItem {
    /// A UAS Datalink Local Set packet.
    UasDatalink(UasDatalinkSet),
    /// A packet whose Universal Label is registered,
    /// decoded with the registered dictionary.
    Set {
        /// the packet's Universal Label key
        key: UniversalLabel,
        /// the decoded set
        set: InMemLocalSet,
    },
    /// A packet with no registered Universal Label,
    /// preserved as opaque bytes after a warning.
    Unknown {
        /// the packet's Universal Label key
        key: UniversalLabel,
        /// the raw value bytes of the packet
        value: Vec<u8>,
    },
}

/// A reader of decoded top-level items over a byte source.
///
/// The registry of known Universal Labels defaults to the process-wide
/// one (holding the UAS Datalink Local Set); a custom per-instance registry
/// may be supplied with [`StreamReader::new_with_registry`].
#[derive(Debug)]
pub struct StreamReader<S> {
    packets: PacketReader<S>,
    registry: UlIndex,
    hard_break: bool,
}

impl<S> StreamReader<S>
where
    S: Read,
{
    /// Create a stream reader using the default Universal Label registry.
    pub fn new(source: S) -> Self {
        StreamReader::new_with_registry(source, ul_registry().clone())
    }

    /// Create a stream reader with a custom Universal Label registry.
    pub fn new_with_registry(source: S, registry: UlIndex) -> Self {
        StreamReader {
            packets: PacketReader::new(source),
            registry,
            hard_break: false,
        }
    }
}

impl<S> Iterator for StreamReader<S>
where
    S: Read,
{
    type Item = Result<StreamItem, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.hard_break {
            return None;
        }
        loop {
            let packet = match self.packets.next()? {
                Ok(packet) => packet,
                Err(e) => {
                    // the top-level stream is desynchronized; stop here
                    self.hard_break = true;
                    return Some(Err(e).context(FramingSnafu));
                }
            };
            let dict = match self.registry.get(&packet.key) {
                Some(dict) => dict,
                None => {
                    warn!(key = %packet.key, "skipping packet with unregistered Universal Label");
                    return Some(Ok(StreamItem::Unknown {
                        key: packet.key,
                        value: packet.value,
                    }));
                }
            };
            // a malformed packet body is abandoned; the next packet may be fine
            if packet.key == UAS_DATALINK_LS {
                match UasDatalinkSet::from_value_bytes(&packet.value) {
                    Ok(set) => return Some(Ok(StreamItem::UasDatalink(set))),
                    Err(e) => {
                        warn!(key = %packet.key, error = %e, "abandoning malformed packet");
                        continue;
                    }
                }
            }
            match InMemLocalSet::from_value_bytes(dict, &packet.value) {
                Ok(set) => {
                    return Some(Ok(StreamItem::Set {
                        key: packet.key,
                        set,
                    }))
                }
                Err(e) => {
                    warn!(key = %packet.key, error = %e, "abandoning malformed packet");
                    continue;
                }
            }
        }
    }
}

/// Read a KLV metadata stream, yielding one decoded item per
/// top-level packet.
///
/// Packets keyed by the UAS Datalink Universal Label are decoded into
/// [`UasDatalinkSet`]; packets with unregistered Universal Labels are
/// yielded as [`StreamItem::Unknown`] after a warning, preserving their
/// bytes. Checksum mismatches are warnings, not errors: the decoded packet
/// is still yielded for diagnostics.
pub fn read_stream<S>(source: S) -> StreamReader<S>
where
    S: Read,
{
    StreamReader::new(source)
}
