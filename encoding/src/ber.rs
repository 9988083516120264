//! BER length octets (ISO/IEC 8825, definite form), canonical flavor.
//!
//! Lengths below 128 use the short form, a single octet.
//! Longer lengths use one length-of-length octet (`0x80 | k`)
//! followed by the value in `k` big-endian octets,
//! where `k` is the fewest octets that hold the value.
//!
//! [`decode`] is strict: it consumes exactly one encoded length and rejects
//! non-minimal and indefinite forms. The stream framer in `klv-parser` reads
//! length octets incrementally and is deliberately more tolerant of
//! non-minimal long forms found in the wild; re-encoding always goes through
//! [`encode`] and is therefore canonical.

use smallvec::{smallvec, SmallVec};
use snafu::{ensure, Backtrace, Snafu};

/// Encoded length octets: at most a length-of-length octet plus eight
/// value octets.
pub type LengthBytes = SmallVec<[u8; 9]>;

/// An error decoding BER length octets.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum MalformedLengthError {
    /// No length octets at all.
    #[snafu(display("no length octets"))]
    Empty {
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// `0x80`, the indefinite form, is not used in KLV.
    #[snafu(display("indefinite BER length is not supported"))]
    Indefinite {
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// The input is not exactly one encoded length.
    #[snafu(display("expected {} length octet(s), got {}", expected, got))]
    WrongOctetCount {
        /// number of octets the first octet declares
        expected: usize,
        /// number of octets present
        got: usize,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// A long form encoding that the canon requires to be shorter.
    #[snafu(display("long form length is not minimal"))]
    NonCanonical {
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// More value octets than a 64-bit length can hold.
    #[snafu(display("length does not fit in 8 octets (got {})", got))]
    Oversized {
        /// declared number of value octets
        got: usize,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
}

type Result<T> = std::result::Result<T, MalformedLengthError>;

/// Encode a length in canonical BER form.
pub fn encode(length: usize) -> LengthBytes {
    if length < 128 {
        return smallvec![length as u8];
    }
    let value = length as u64;
    let octets = ((64 - value.leading_zeros() + 7) / 8) as usize;
    let mut out = LengthBytes::with_capacity(1 + octets);
    out.push(0x80 | octets as u8);
    out.extend_from_slice(&value.to_be_bytes()[8 - octets..]);
    out
}

/// Decode exactly one canonical BER length from the given octets.
///
/// Fails with [`MalformedLengthError`] if the input is empty, truncated,
/// longer than the encoded length, indefinite, non-minimal,
/// or wider than 64 bits.
pub fn decode(data: &[u8]) -> Result<usize> {
    let first = *data.first().ok_or_else(|| EmptySnafu.build())?;
    if first < 0x80 {
        ensure!(
            data.len() == 1,
            WrongOctetCountSnafu {
                expected: 1_usize,
                got: data.len(),
            }
        );
        return Ok(usize::from(first));
    }
    let octets = usize::from(first & 0x7F);
    ensure!(octets != 0, IndefiniteSnafu);
    ensure!(octets <= 8, OversizedSnafu { got: octets });
    ensure!(
        data.len() == 1 + octets,
        WrongOctetCountSnafu {
            expected: 1 + octets,
            got: data.len(),
        }
    );
    // minimal form: no leading zero octet, and no long form below 128
    ensure!(octets == 1 || data[1] != 0, NonCanonicalSnafu);
    let mut value = 0_u64;
    for &octet in &data[1..] {
        value = (value << 8) | u64::from(octet);
    }
    ensure!(value >= 128, NonCanonicalSnafu);
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_form_boundaries() {
        assert_eq!(&encode(0)[..], &[0x00]);
        assert_eq!(&encode(1)[..], &[0x01]);
        assert_eq!(&encode(127)[..], &[0x7F]);
        assert_eq!(decode(&[0x00]).unwrap(), 0);
        assert_eq!(decode(&[0x7F]).unwrap(), 127);
    }

    #[test]
    fn long_form_boundaries() {
        assert_eq!(&encode(128)[..], &[0x81, 0x80]);
        assert_eq!(&encode(255)[..], &[0x81, 0xFF]);
        assert_eq!(&encode(256)[..], &[0x82, 0x01, 0x00]);
        assert_eq!(decode(&[0x81, 0x80]).unwrap(), 128);
        assert_eq!(decode(&[0x81, 0xFF]).unwrap(), 255);
        assert_eq!(decode(&[0x82, 0x01, 0x00]).unwrap(), 256);
    }

    #[test]
    fn round_trips() {
        for n in [0, 1, 127, 128, 255, 256, 65535, 65536, 1 << 24, usize::MAX >> 1] {
            assert_eq!(decode(&encode(n)).unwrap(), n, "length {}", n);
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(decode(&[]), Err(MalformedLengthError::Empty { .. })));
    }

    #[test]
    fn rejects_indefinite() {
        assert!(matches!(
            decode(&[0x80]),
            Err(MalformedLengthError::Indefinite { .. })
        ));
    }

    #[test]
    fn rejects_truncated_long_form() {
        assert!(matches!(
            decode(&[0x82, 0xFF]),
            Err(MalformedLengthError::WrongOctetCount { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn rejects_trailing_octets() {
        assert!(matches!(
            decode(&[0x05, 0x00]),
            Err(MalformedLengthError::WrongOctetCount { .. })
        ));
    }

    #[test]
    fn rejects_non_minimal() {
        // long form for a value below 128
        assert!(matches!(
            decode(&[0x81, 0x05]),
            Err(MalformedLengthError::NonCanonical { .. })
        ));
        // leading zero octet
        assert!(matches!(
            decode(&[0x82, 0x00, 0xFF]),
            Err(MalformedLengthError::NonCanonical { .. })
        ));
    }

    #[test]
    fn rejects_oversized() {
        let mut data = vec![0x89];
        data.extend_from_slice(&[0xFF; 9]);
        assert!(matches!(
            decode(&data),
            Err(MalformedLengthError::Oversized { got: 9, .. })
        ));
    }
}
