//! This module contains the pull-based KLV tokenizer.
//!
//! The reader yields `(key, length, value)` triples from a byte source
//! until the source is exhausted. A clean end of file at a key boundary
//! terminates the sequence; anything shorter is a framing error which
//! fuses the iterator, since a desynchronized KLV stream cannot be
//! re-synchronized reliably.

use std::io::Read;

use smallvec::SmallVec;
use snafu::{Backtrace, ResultExt, Snafu};
use tracing::warn;

/// Buffer for raw key bytes (1 or 16 of them).
pub type KeyBuf = SmallVec<[u8; 16]>;
/// Buffer for raw length octets as read from the wire.
pub type LengthBuf = SmallVec<[u8; 9]>;

/// The key length of the enclosing KLV context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyLength {
    /// 1-byte local tags, inside a local set.
    Local,
    /// 16-byte Universal Labels, at the top level of a stream.
    Universal,
}

impl KeyLength {
    /// The number of key bytes to read per triple.
    pub fn byte_count(self) -> usize {
        match self {
            KeyLength::Local => 1,
            KeyLength::Universal => 16,
        }
    }
}

/// An error which occurs while framing a KLV stream.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    /// An I/O failure while reading key bytes.
    #[snafu(display("failed to read key bytes"))]
    ReadKey {
        /// the underlying I/O error
        source: std::io::Error,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// End of source in the middle of a key.
    #[snafu(display("premature end of stream: got {} of {} key byte(s)", got, expected))]
    TruncatedKey {
        /// expected key byte count
        expected: usize,
        /// bytes actually read
        got: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// An I/O failure while reading length octets.
    #[snafu(display("failed to read length octets"))]
    ReadLength {
        /// the underlying I/O error
        source: std::io::Error,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// End of source in the middle of the BER length.
    #[snafu(display("premature end of stream: got {} of {} length octet(s)", got, expected))]
    TruncatedLength {
        /// expected octet count
        expected: usize,
        /// octets actually read
        got: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The indefinite BER form (`0x80`) is not valid in KLV.
    #[snafu(display("indefinite BER length is not supported"))]
    IndefiniteLength {
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// A declared length wider than 64 bits.
    #[snafu(display("BER length does not fit in 8 octets (got {})", octets))]
    OversizedLength {
        /// declared number of length octets
        octets: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// An I/O failure while reading the value.
    #[snafu(display("failed to read value bytes"))]
    ReadValue {
        /// the underlying I/O error
        source: std::io::Error,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// End of source in the middle of the value.
    #[snafu(display("premature end of stream: got {} of {} value byte(s)", got, expected))]
    TruncatedValue {
        /// declared value byte count
        expected: usize,
        /// bytes actually read
        got: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type Result<T> = std::result::Result<T, Error>;

/// A raw key-length-value triple, exactly as framed on the wire.
///
/// The length octets are kept as read, so that checksum verification can
/// cover the original packet bytes even for non-minimal long forms;
/// re-encoding always produces the canonical form instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKlv {
    /// the raw key bytes
    pub key: KeyBuf,
    /// the raw BER length octets
    pub length: LengthBuf,
    /// the value bytes
    pub value: Vec<u8>,
}

/// A pull-based tokenizer yielding KLV triples from a readable byte source.
///
/// The reader is a lazy finite sequence driven by a single consumer;
/// it is restartable only by recreating it over a fresh source.
/// Any framing error fuses the iteration.
#[derive(Debug)]
pub struct KlvReader<S> {
    source: S,
    key_length: KeyLength,
    hard_break: bool,
}

impl<S> KlvReader<S>
where
    S: Read,
{
    /// Create a new reader over the given source.
    pub fn new(source: S, key_length: KeyLength) -> Self {
        KlvReader {
            source,
            key_length,
            hard_break: false,
        }
    }

    /// Retrieve the source back, consuming the reader.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Read as many bytes as fit in `buf`, stopping early only at the end
    /// of the source. Returns the number of bytes actually read.
    fn read_up_to(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.source.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }

    /// Read one triple, or `None` on a clean end of stream.
    fn read_triple(&mut self) -> Result<Option<RawKlv>> {
        let expected = self.key_length.byte_count();
        let mut key = KeyBuf::from_elem(0, expected);
        let got = self.read_up_to(&mut key).context(ReadKeySnafu)?;
        if got == 0 {
            // clean EOF at a key boundary
            return Ok(None);
        }
        snafu::ensure!(got == expected, TruncatedKeySnafu { expected, got });

        let mut first = [0_u8; 1];
        let got = self.read_up_to(&mut first).context(ReadLengthSnafu)?;
        snafu::ensure!(
            got == 1,
            TruncatedLengthSnafu {
                expected: 1_usize,
                got
            }
        );
        let mut length = LengthBuf::new();
        length.push(first[0]);

        let declared = if first[0] < 0x80 {
            usize::from(first[0])
        } else {
            let octets = usize::from(first[0] & 0x7F);
            snafu::ensure!(octets != 0, IndefiniteLengthSnafu);
            snafu::ensure!(octets <= 8, OversizedLengthSnafu { octets });
            let mut long = [0_u8; 8];
            let got = self.read_up_to(&mut long[..octets]).context(ReadLengthSnafu)?;
            snafu::ensure!(
                got == octets,
                TruncatedLengthSnafu {
                    expected: octets,
                    got
                }
            );
            length.extend_from_slice(&long[..octets]);
            let mut value = 0_usize;
            for &octet in &long[..octets] {
                value = (value << 8) | usize::from(octet);
            }
            value
        };

        if declared == 0 {
            warn!("zero length value requested");
        }
        let mut value = vec![0_u8; declared];
        let got = self.read_up_to(&mut value).context(ReadValueSnafu)?;
        snafu::ensure!(
            got == declared,
            TruncatedValueSnafu {
                expected: declared,
                got
            }
        );

        Ok(Some(RawKlv { key, length, value }))
    }
}

impl<S> Iterator for KlvReader<S>
where
    S: Read,
{
    type Item = Result<RawKlv>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.hard_break {
            return None;
        }
        match self.read_triple() {
            Ok(Some(triple)) => Some(Ok(triple)),
            Ok(None) => {
                self.hard_break = true;
                None
            }
            Err(e) => {
                self.hard_break = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(data: &[u8], key_length: KeyLength) -> Vec<Result<RawKlv>> {
        KlvReader::new(data, key_length).collect()
    }

    #[test]
    fn reads_local_triples_in_order() {
        let data: &[u8] = &[
            0x02, 0x01, 0xAA, // tag 2
            0x05, 0x02, 0x71, 0xC2, // tag 5
        ];
        let triples: Vec<_> = collect(data, KeyLength::Local)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(triples.len(), 2);
        assert_eq!(&triples[0].key[..], &[0x02]);
        assert_eq!(triples[0].value, vec![0xAA]);
        assert_eq!(&triples[1].key[..], &[0x05]);
        assert_eq!(&triples[1].length[..], &[0x02]);
        assert_eq!(triples[1].value, vec![0x71, 0xC2]);
    }

    #[test]
    fn reads_long_form_length() {
        let mut data = vec![0x30, 0x81, 0x80];
        data.extend_from_slice(&[0x55; 128]);
        let triples: Vec<_> = collect(&data, KeyLength::Local)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(triples.len(), 1);
        assert_eq!(&triples[0].length[..], &[0x81, 0x80]);
        assert_eq!(triples[0].value.len(), 128);
    }

    #[test]
    fn zero_length_value_is_permitted() {
        let data: &[u8] = &[0x03, 0x00];
        let triples: Vec<_> = collect(data, KeyLength::Local)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(triples.len(), 1);
        assert!(triples[0].value.is_empty());
    }

    #[test]
    fn clean_eof_terminates() {
        assert!(collect(&[], KeyLength::Local).is_empty());
        assert!(collect(&[], KeyLength::Universal).is_empty());
    }

    #[test]
    fn eof_mid_key_is_an_error() {
        let data = [0x06, 0x0E, 0x2B]; // 3 of 16 key bytes
        let mut results = collect(&data, KeyLength::Universal);
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results.remove(0),
            Err(Error::TruncatedKey {
                expected: 16,
                got: 3,
                ..
            })
        ));
    }

    #[test]
    fn eof_mid_length_is_an_error() {
        // long form declares 2 octets, only 1 present
        let data = [0x02, 0x82, 0xFF];
        let mut results = collect(&data, KeyLength::Local);
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results.remove(0),
            Err(Error::TruncatedLength { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn eof_mid_value_is_an_error() {
        let data = [0x02, 0x08, 0x00, 0x04];
        let mut results = collect(&data, KeyLength::Local);
        assert_eq!(results.len(), 1);
        assert!(matches!(
            results.remove(0),
            Err(Error::TruncatedValue {
                expected: 8,
                got: 2,
                ..
            })
        ));
    }

    #[test]
    fn indefinite_length_is_an_error() {
        let data = [0x02, 0x80];
        let mut results = collect(&data, KeyLength::Local);
        assert!(matches!(
            results.remove(0),
            Err(Error::IndefiniteLength { .. })
        ));
    }

    #[test]
    fn errors_fuse_the_iterator() {
        let data = [0x02, 0x82, 0xFF];
        let mut reader = KlvReader::new(&data[..], KeyLength::Local);
        assert!(matches!(reader.next(), Some(Err(_))));
        assert!(reader.next().is_none());
    }
}
