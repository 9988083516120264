//! Encoding of typed primitive values back into raw value bytes.
//!
//! Every value carries its own conversion parameters, so encoding needs no
//! dictionary. Values constructed by `decode::read_value` re-encode to the
//! exact bytes they were decoded from; user-constructed values are validated
//! at construction, leaving only pre-epoch time stamps as a run-time
//! encoding failure.

use std::convert::TryFrom;

use byteordered::byteorder::{BigEndian, ByteOrder};
use klv_core::value::{LocationValue, MappedValue, PrimitiveValue};
use snafu::{OptionExt, ResultExt, Snafu};

use crate::imapb;
use crate::mapped;
use crate::text::{EncodeTextError, TextCodec};

/// An error which occurs when a typed value cannot be put on the wire.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum EncodeValueError {
    /// Instants before the UNIX epoch have no unsigned microsecond count.
    #[snafu(display("time stamp predates the epoch"))]
    TimeBeforeEpoch,
    /// The text cannot be represented in its declared repertoire.
    #[snafu(display("failed to encode text"))]
    EncodeText {
        /// the underlying text codec error
        source: EncodeTextError,
    },
}

type Result<T> = std::result::Result<T, EncodeValueError>;

/// Encode a typed primitive value into its raw value bytes.
pub fn value_bytes(value: &PrimitiveValue) -> Result<Vec<u8>> {
    match value {
        PrimitiveValue::Bytes(bytes) => Ok(bytes.to_vec()),
        PrimitiveValue::DateTime(instant) => {
            let bytes = crate::timestamp::encode(*instant).context(TimeBeforeEpochSnafu)?;
            Ok(bytes.to_vec())
        }
        PrimitiveValue::Str(text) => match text.as_str() {
            Some(s) => text.encoding().encode(s).context(EncodeTextSnafu),
            // undecodable input bytes are emitted unchanged
            None => Ok(text.as_raw().unwrap_or_default().to_vec()),
        },
        PrimitiveValue::Integer(v) => {
            let mut out = vec![0_u8; usize::from(v.length())];
            if v.signed() {
                BigEndian::write_int(&mut out, v.value(), usize::from(v.length()));
            } else {
                let value = u64::try_from(v.value()).unwrap_or_default();
                BigEndian::write_uint(&mut out, value, usize::from(v.length()));
            }
            Ok(out)
        }
        PrimitiveValue::Mapped(v) => Ok(mapped_bytes(v)),
        PrimitiveValue::Enumerated(v) => {
            let mut out = vec![0_u8; usize::from(v.length())];
            BigEndian::write_uint(&mut out, v.index(), usize::from(v.length()));
            Ok(out)
        }
        PrimitiveValue::Imapb(v) => match v.special_bytes() {
            Some(bytes) => Ok(bytes.to_vec()),
            None => {
                let y = imapb::from_real(v.range(), v.length(), v.real().unwrap_or_default());
                let mut out = vec![0_u8; usize::from(v.length())];
                BigEndian::write_uint(&mut out, y, usize::from(v.length()));
                Ok(out)
            }
        },
        PrimitiveValue::Location(v) => Ok(location_bytes(v)),
    }
}

fn mapped_bytes(value: &MappedValue) -> Vec<u8> {
    let params = value.params();
    let length = usize::from(params.byte_length());
    let mut out = vec![0_u8; length];
    match value.real() {
        Some(y) => {
            let x = mapped::from_real(params, y);
            if params.signed() {
                BigEndian::write_int(&mut out, x, length);
            } else {
                BigEndian::write_uint(&mut out, u64::try_from(x).unwrap_or_default(), length);
            }
        }
        None => {
            // the standard error indicator: most-negative lattice integer
            BigEndian::write_int(&mut out, mapped::error_sentinel(params.byte_length()), length);
        }
    }
    out
}

fn location_bytes(value: &LocationValue) -> Vec<u8> {
    let mut out = vec![0_u8; 10];
    let lat = imapb::from_real(LocationValue::LATITUDE_RANGE, 4, value.latitude());
    let lon = imapb::from_real(LocationValue::LONGITUDE_RANGE, 4, value.longitude());
    let alt = imapb::from_real(LocationValue::ALTITUDE_RANGE, 2, value.altitude());
    BigEndian::write_uint(&mut out[0..4], lat, 4);
    BigEndian::write_uint(&mut out[4..8], lon, 4);
    BigEndian::write_uint(&mut out[8..10], alt, 2);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::read_value;
    use klv_core::dictionary::ValueKind;
    use klv_core::value::{ImapbValue, IntegerValue, MappedParams, TextEncoding, TextValue};

    fn round_trips(kind: &ValueKind, data: &[u8]) {
        let value = read_value(kind, data).unwrap();
        assert_eq!(value_bytes(&value).unwrap(), data, "kind {:?}", kind);
    }

    #[test]
    fn decoded_values_round_trip() {
        round_trips(&ValueKind::Bytes, &[0xAA, 0x43]);
        round_trips(&ValueKind::DateTime, &[0x00, 0x04, 0x60, 0x50, 0x58, 0x4E, 0x01, 0x80]);
        round_trips(
            &ValueKind::Text {
                encoding: TextEncoding::Utf8,
            },
            b"Mission 12",
        );
        round_trips(
            &ValueKind::Integer {
                length: 1,
                signed: true,
            },
            &[0xE7],
        );
        round_trips(
            &ValueKind::Mapped {
                domain: (0, 65535),
                range: (0.0, 360.0),
            },
            &[0x71, 0xC2],
        );
        round_trips(
            &ValueKind::Mapped {
                domain: (-32767, 32767),
                range: (-20.0, 20.0),
            },
            &[0xFD, 0x3D],
        );
        round_trips(
            &ValueKind::Mapped {
                domain: (-2147483647, 2147483647),
                range: (-90.0, 90.0),
            },
            &[0x55, 0x95, 0xB6, 0x6D],
        );
        round_trips(
            &ValueKind::Imapb {
                range: (-900.0, 19000.0),
            },
            &[0x03, 0x8E],
        );
        round_trips(
            &ValueKind::Location,
            &[0x40, 0x6B, 0xC2, 0x08, 0x19, 0xBD, 0xA5, 0x54, 0x03, 0x87],
        );
    }

    #[test]
    fn error_sentinel_round_trips() {
        let kind = ValueKind::Mapped {
            domain: (-32767, 32767),
            range: (-20.0, 20.0),
        };
        round_trips(&kind, &[0x80, 0x00]);
    }

    #[test]
    fn imapb_special_round_trips() {
        let kind = ValueKind::Imapb {
            range: (-900.0, 19000.0),
        };
        round_trips(&kind, &[0xC8, 0x00]);
        round_trips(&kind, &[0xE8, 0x00]);
    }

    #[test]
    fn raw_text_round_trips() {
        let kind = ValueKind::Text {
            encoding: TextEncoding::Utf8,
        };
        round_trips(&kind, &[0xC3, 0x28]);
    }

    #[test]
    fn user_constructed_heading_encodes_to_reference_bytes() {
        let params = MappedParams::new((0, 65535), (0.0, 360.0));
        let value = PrimitiveValue::Mapped(MappedValue::from_real(params, 159.974).unwrap());
        assert_eq!(value_bytes(&value).unwrap(), [0x71, 0xC2]);
    }

    #[test]
    fn user_constructed_pitch_encodes_to_reference_bytes() {
        let params = MappedParams::new((-32767, 32767), (-20.0, 20.0));
        let value = PrimitiveValue::Mapped(MappedValue::from_real(params, -0.4315).unwrap());
        assert_eq!(value_bytes(&value).unwrap(), [0xFD, 0x3D]);
    }

    #[test]
    fn user_constructed_latitude_encodes_to_reference_bytes() {
        let params = MappedParams::new((-2147483647, 2147483647), (-90.0, 90.0));
        let value =
            PrimitiveValue::Mapped(MappedValue::from_real(params, 60.1768229669783).unwrap());
        assert_eq!(value_bytes(&value).unwrap(), [0x55, 0x95, 0xB6, 0x6D]);
    }

    #[test]
    fn integer_width_is_respected() {
        let value = PrimitiveValue::Integer(IntegerValue::new(10, 2, false).unwrap());
        assert_eq!(value_bytes(&value).unwrap(), [0x00, 0x0A]);
    }

    #[test]
    fn empty_string_encodes_to_no_bytes() {
        let value =
            PrimitiveValue::Str(TextValue::new(TextEncoding::Utf8, "").unwrap());
        assert_eq!(value_bytes(&value).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn imapb_user_value_encodes() {
        let value =
            PrimitiveValue::Imapb(ImapbValue::from_real((-900.0, 19000.0), 2, 10.0).unwrap());
        assert_eq!(value_bytes(&value).unwrap(), [0x03, 0x8E]);
    }
}
