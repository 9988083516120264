//! Decoding of raw value bytes into the typed primitive values of
//! `klv-core`, directed by the [`ValueKind`] a dictionary declares
//! for the element's tag.
//!
//! Failures here are *value construction errors*: the set parser upstream
//! degrades the element to an unknown element holding the original bytes,
//! preserving the byte-exact round trip.

use std::convert::TryFrom;

use byteordered::byteorder::{BigEndian, ByteOrder};
use klv_core::dictionary::ValueKind;
use klv_core::value::{
    EnumValue, ImapbValue, IntegerValue, LocationValue, MappedParams, MappedValue, PrimitiveValue,
    TextValue,
};
use snafu::{ensure, Backtrace, OptionExt, ResultExt, Snafu};

use crate::imapb;
use crate::mapped;
use crate::text::TextCodec;
use crate::timestamp;

/// An error which occurs when a registered conversion refuses
/// the value bytes of an element.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum DecodeValueError {
    /// The value has a different byte length than the conversion declares.
    #[snafu(display("expected {} value byte(s), got {}", expected, got))]
    ValueLength {
        /// expected byte length
        expected: usize,
        /// actual byte length
        got: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The time stamp bytes do not hold a representable instant.
    #[snafu(display("failed to interpret time stamp"))]
    InterpretTime {
        /// the underlying time codec error
        source: timestamp::TimeRangeError,
    },
    /// The integer does not fit the in-memory representation.
    #[snafu(display("integer value does not fit in 64 bits"))]
    IntegerPrecision {
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// An IMAPB wire length outside the supported 1 to 8 bytes.
    #[snafu(display("unsupported IMAPB length of {} byte(s)", got))]
    ImapbLength {
        /// actual byte length
        got: usize,
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// An ST 1201 special value inside a location triple.
    #[snafu(display("special value inside a location triple"))]
    SpecialInLocation {
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
    /// The typed value refused its parameters.
    #[snafu(display("failed to construct typed value"))]
    Construction {
        /// the underlying validation error
        source: klv_core::value::InvalidValueError,
    },
    /// The declared kind is a nested set,
    /// which is decoded by the set parser, not here.
    #[snafu(display("nested sets are not primitive values"))]
    NotPrimitive {
        /// The generated backtrace, if available.
        backtrace: Backtrace,
    },
}

type Result<T> = std::result::Result<T, DecodeValueError>;

/// Decode the value bytes of an element into a typed primitive value,
/// as directed by the given kind.
///
/// Text which fails to decode in its declared repertoire is *not* an error:
/// it degrades to a raw text value which re-encodes byte-identically.
pub fn read_value(kind: &ValueKind, data: &[u8]) -> Result<PrimitiveValue> {
    match *kind {
        ValueKind::Bytes => Ok(PrimitiveValue::Bytes(data.into())),
        ValueKind::DateTime => {
            let instant = timestamp::decode(data).context(InterpretTimeSnafu)?;
            Ok(PrimitiveValue::DateTime(instant))
        }
        ValueKind::Text { encoding } => {
            let value = match encoding.decode(data) {
                Ok(text) => {
                    TextValue::new(encoding, text).unwrap_or_else(|_| TextValue::raw(encoding, data))
                }
                Err(_) => TextValue::raw(encoding, data),
            };
            Ok(PrimitiveValue::Str(value))
        }
        ValueKind::Integer { length, signed } => {
            ensure!(
                data.len() == usize::from(length),
                ValueLengthSnafu {
                    expected: usize::from(length),
                    got: data.len(),
                }
            );
            let value = if signed {
                BigEndian::read_int(data, data.len())
            } else {
                i64::try_from(BigEndian::read_uint(data, data.len()))
                    .ok()
                    .context(IntegerPrecisionSnafu)?
            };
            let value = IntegerValue::new(value, length, signed).context(ConstructionSnafu)?;
            Ok(PrimitiveValue::Integer(value))
        }
        ValueKind::Mapped { domain, range } => {
            let params = MappedParams::new(domain, range);
            read_mapped(params, data).map(PrimitiveValue::Mapped)
        }
        ValueKind::Enumerated { length, symbols } => {
            ensure!(
                data.len() == usize::from(length),
                ValueLengthSnafu {
                    expected: usize::from(length),
                    got: data.len(),
                }
            );
            let index = BigEndian::read_uint(data, data.len());
            let value = EnumValue::new(index, length, symbols).context(ConstructionSnafu)?;
            Ok(PrimitiveValue::Enumerated(value))
        }
        ValueKind::Imapb { range } => read_imapb(range, data).map(PrimitiveValue::Imapb),
        ValueKind::Location => {
            ensure!(
                data.len() == 10,
                ValueLengthSnafu {
                    expected: 10_usize,
                    got: data.len(),
                }
            );
            let latitude = read_location_part(LocationValue::LATITUDE_RANGE, &data[0..4])?;
            let longitude = read_location_part(LocationValue::LONGITUDE_RANGE, &data[4..8])?;
            let altitude = read_location_part(LocationValue::ALTITUDE_RANGE, &data[8..10])?;
            Ok(PrimitiveValue::Location(LocationValue::decoded(
                latitude, longitude, altitude,
            )))
        }
        ValueKind::Set(_) => NotPrimitiveSnafu.fail(),
    }
}

fn read_mapped(params: MappedParams, data: &[u8]) -> Result<MappedValue> {
    let length = params.byte_length();
    ensure!(
        data.len() == usize::from(length),
        ValueLengthSnafu {
            expected: usize::from(length),
            got: data.len(),
        }
    );
    if params.signed() {
        let x = BigEndian::read_int(data, data.len());
        if x == mapped::error_sentinel(length) {
            return Ok(MappedValue::error_indicator(params));
        }
        Ok(MappedValue::decoded(params, mapped::to_real(&params, x)))
    } else {
        let x = i64::try_from(BigEndian::read_uint(data, data.len()))
            .ok()
            .context(IntegerPrecisionSnafu)?;
        Ok(MappedValue::decoded(params, mapped::to_real(&params, x)))
    }
}

fn read_imapb(range: (f64, f64), data: &[u8]) -> Result<ImapbValue> {
    ensure!(
        (1..=8).contains(&data.len()),
        ImapbLengthSnafu { got: data.len() }
    );
    if imapb::is_special(data) {
        return Ok(ImapbValue::special(range, data));
    }
    let y = BigEndian::read_uint(data, data.len());
    let length = data.len() as u8;
    Ok(ImapbValue::decoded(
        range,
        length,
        imapb::to_real(range, length, y),
    ))
}

fn read_location_part(range: (f64, f64), data: &[u8]) -> Result<f64> {
    ensure!(!imapb::is_special(data), SpecialInLocationSnafu);
    let y = BigEndian::read_uint(data, data.len());
    Ok(imapb::to_real(range, data.len() as u8, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use klv_core::value::TextEncoding;

    #[test]
    fn reads_checksum_bytes() {
        let value = read_value(&ValueKind::Bytes, &[0xAA, 0x43]).unwrap();
        assert_eq!(value.to_string(), "0xAA43");
    }

    #[test]
    fn reads_mission_id() {
        let value = read_value(
            &ValueKind::Text {
                encoding: TextEncoding::Utf8,
            },
            b"Mission 12",
        )
        .unwrap();
        assert_eq!(value.to_string(), "Mission 12");
    }

    #[test]
    fn zero_length_string_is_empty() {
        let value = read_value(
            &ValueKind::Text {
                encoding: TextEncoding::Utf8,
            },
            b"",
        )
        .unwrap();
        assert_eq!(value.to_string(), "");
    }

    #[test]
    fn undecodable_text_degrades_to_raw() {
        let value = read_value(
            &ValueKind::Text {
                encoding: TextEncoding::Utf8,
            },
            &[0xC3, 0x28],
        )
        .unwrap();
        match value {
            PrimitiveValue::Str(text) => {
                assert_eq!(text.as_raw(), Some([0xC3, 0x28].as_ref()));
            }
            other => panic!("expected a string value, got {:?}", other),
        }
    }

    #[test]
    fn reads_mapped_heading() {
        let kind = ValueKind::Mapped {
            domain: (0, 65535),
            range: (0.0, 360.0),
        };
        let value = read_value(&kind, &[0x71, 0xC2]).unwrap();
        match value {
            PrimitiveValue::Mapped(v) => {
                assert!((v.real().unwrap() - 159.97436484321355).abs() < 1e-12)
            }
            other => panic!("expected a mapped value, got {:?}", other),
        }
    }

    #[test]
    fn mapped_error_sentinel() {
        let kind = ValueKind::Mapped {
            domain: (-32767, 32767),
            range: (-20.0, 20.0),
        };
        let value = read_value(&kind, &[0x80, 0x00]).unwrap();
        assert_eq!(value.to_string(), "0x8000 (Standard error indicator)");
    }

    #[test]
    fn mapped_wrong_length_is_refused() {
        let kind = ValueKind::Mapped {
            domain: (0, 65535),
            range: (0.0, 360.0),
        };
        assert!(matches!(
            read_value(&kind, &[0x71]),
            Err(DecodeValueError::ValueLength {
                expected: 2,
                got: 1,
                ..
            })
        ));
    }

    #[test]
    fn reads_location_triple() {
        let data = [0x40, 0x6B, 0xC2, 0x08, 0x19, 0xBD, 0xA5, 0x54, 0x03, 0x87];
        let value = read_value(&ValueKind::Location, &data).unwrap();
        match value {
            PrimitiveValue::Location(v) => {
                assert!((v.latitude() - 38.841858863830566).abs() < 1e-9);
                assert!((v.longitude() - -77.0367841720581).abs() < 1e-9);
                assert!((v.altitude() - 3.0).abs() < 1e-9);
            }
            other => panic!("expected a location value, got {:?}", other),
        }
    }

    #[test]
    fn imapb_special_is_preserved() {
        let kind = ValueKind::Imapb {
            range: (-900.0, 19000.0),
        };
        let value = read_value(&kind, &[0xC8, 0x00]).unwrap();
        assert_eq!(value.to_string(), "0xC800 (Positive Infinity)");
    }
}
