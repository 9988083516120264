//! This module includes the representation of values held by KLV elements.
//!
//! Each [`PrimitiveValue`] variant carries the parameters of its own wire
//! conversion (byte length, signedness, mapping domain and range, character
//! repertoire), so that a value decoded from a stream can be re-encoded to
//! the exact same bytes without consulting a dictionary a second time.
//!
//! User-constructed values go through validating constructors which refuse
//! out-of-range inputs up front (`InvalidValueError`), keeping the byte
//! encoding itself infallible for everything except pre-epoch time stamps.

use std::fmt;

use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use snafu::{ensure, Backtrace, Snafu};

/// Inline byte buffer for element values, which are usually short.
pub type Buf = SmallVec<[u8; 16]>;

/// An error which occurs when constructing a typed value
/// from a native input that the declared conversion cannot represent.
///
/// Encoders must fail with this error rather than silently clamping.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum InvalidValueError {
    /// The real value is outside the declared mapping range.
    #[snafu(display("value {} is outside of the range [{}, {}]", value, min, max))]
    OutOfRange {
        /// the rejected value
        value: f64,
        /// lower bound of the declared range
        min: f64,
        /// upper bound of the declared range
        max: f64,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// The integer does not fit in the declared byte length.
    #[snafu(display(
        "integer {} does not fit in {} {} byte(s)",
        value,
        length,
        if *signed { "signed" } else { "unsigned" }
    ))]
    IntegerOverflow {
        /// the rejected value
        value: i64,
        /// declared byte length
        length: u8,
        /// declared signedness
        signed: bool,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// The enumeration index does not fit in the declared byte length.
    #[snafu(display("enumeration index {} does not fit in {} byte(s)", index, length))]
    IndexOverflow {
        /// the rejected index
        index: u64,
        /// declared byte length
        length: u8,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// The text contains characters outside the declared repertoire.
    #[snafu(display("text is not representable in ISO 646"))]
    NotIso646 {
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
}

type Result<T, E = InvalidValueError> = std::result::Result<T, E>;

/// The value held by a KLV element:
/// either a primitive leaf value, a nested local set,
/// or the preserved raw bytes of an unrecognized tag.
///
/// The type parameter `I` is the concrete nested-set representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<I> {
    /// A primitive leaf value.
    Primitive(PrimitiveValue),
    /// A nested local set, decoded with its own tag dictionary.
    Set(I),
    /// The raw value bytes of a tag with no registered conversion,
    /// or of an element whose registered conversion rejected its bytes.
    /// Preserved as-is so that re-encoding is byte-identical.
    Unknown(Buf),
}

impl<I> Value<I> {
    /// Retrieve the primitive value, if this is a primitive.
    pub fn primitive(&self) -> Option<&PrimitiveValue> {
        match self {
            Value::Primitive(v) => Some(v),
            _ => None,
        }
    }

    /// Retrieve the nested set, if this is a set.
    pub fn set(&self) -> Option<&I> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Retrieve the nested set mutably, if this is a set.
    pub fn set_mut(&mut self) -> Option<&mut I> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }
}

impl<I> From<PrimitiveValue> for Value<I> {
    fn from(value: PrimitiveValue) -> Self {
        Value::Primitive(value)
    }
}

impl<I> fmt::Display for Value<I>
where
    I: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Primitive(v) => v.fmt(f),
            Value::Set(s) => s.fmt(f),
            Value::Unknown(bytes) => fmt_hex(f, bytes),
        }
    }
}

/// A primitive value held by a leaf element,
/// together with the parameters of its wire conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    /// Opaque bytes (e.g. the checksum element, UMID fields).
    Bytes(Buf),
    /// A UTC instant with microsecond resolution
    /// (8-byte big-endian microseconds since the UNIX epoch on the wire).
    DateTime(DateTime<Utc>),
    /// A character string in a declared repertoire.
    Str(TextValue),
    /// A big-endian integer of fixed byte length.
    Integer(IntegerValue),
    /// A real value linearly mapped onto an integer lattice (ST 0601 §8).
    Mapped(MappedValue),
    /// An integer index into a declared symbol table.
    Enumerated(EnumValue),
    /// A real value mapped per MISB ST 1201 (IMAPB).
    Imapb(ImapbValue),
    /// A latitude/longitude/altitude triple of IMAPB values.
    Location(LocationValue),
}

impl fmt::Display for PrimitiveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveValue::Bytes(bytes) => fmt_hex(f, bytes),
            PrimitiveValue::DateTime(dt) => fmt_datetime(f, dt),
            PrimitiveValue::Str(v) => v.fmt(f),
            PrimitiveValue::Integer(v) => v.fmt(f),
            PrimitiveValue::Mapped(v) => v.fmt(f),
            PrimitiveValue::Enumerated(v) => v.fmt(f),
            PrimitiveValue::Imapb(v) => v.fmt(f),
            PrimitiveValue::Location(v) => v.fmt(f),
        }
    }
}

/// `0x`-prefixed uppercase hexadecimal with no separator,
/// the canonical rendering for opaque byte values.
fn fmt_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    f.write_str("0x")?;
    for byte in bytes {
        write!(f, "{:02X}", byte)?;
    }
    Ok(())
}

fn fmt_datetime(f: &mut fmt::Formatter<'_>, dt: &DateTime<Utc>) -> fmt::Result {
    if dt.timestamp_subsec_micros() == 0 {
        write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S"))
    } else {
        write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S%.6f"))
    }
}

/// An identifier of a supported character repertoire for string values.
///
/// The codec implementations live in `klv-encoding`;
/// this type only records which repertoire a value or dictionary entry uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8, the ST 0601 default.
    Utf8,
    /// ISO 646 (ASCII), used by most ST 0102 text fields.
    Iso646,
    /// UTF-16 big-endian, used by the ST 0102 Object Country Codes.
    Utf16Be,
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Utf8
    }
}

/// A string value, or the raw bytes of a string element
/// which could not be decoded in its declared repertoire.
#[derive(Debug, Clone, PartialEq)]
pub struct TextValue {
    encoding: TextEncoding,
    repr: TextRepr,
}

#[derive(Debug, Clone, PartialEq)]
enum TextRepr {
    Text(String),
    Raw(Buf),
}

impl TextValue {
    /// Create a text value from a native string,
    /// validating it against the declared repertoire.
    pub fn new(encoding: TextEncoding, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if encoding == TextEncoding::Iso646 {
            ensure!(text.is_ascii(), NotIso646Snafu);
        }
        Ok(TextValue {
            encoding,
            repr: TextRepr::Text(text),
        })
    }

    /// Create a text value holding raw bytes which failed to decode.
    /// The bytes are emitted unchanged when the element is re-encoded.
    pub fn raw(encoding: TextEncoding, bytes: impl Into<Buf>) -> Self {
        TextValue {
            encoding,
            repr: TextRepr::Raw(bytes.into()),
        }
    }

    /// The declared character repertoire.
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The decoded text, unless this value holds undecodable raw bytes.
    pub fn as_str(&self) -> Option<&str> {
        match &self.repr {
            TextRepr::Text(s) => Some(s),
            TextRepr::Raw(_) => None,
        }
    }

    /// The raw bytes, if this value failed to decode.
    pub fn as_raw(&self) -> Option<&[u8]> {
        match &self.repr {
            TextRepr::Raw(b) => Some(b),
            TextRepr::Text(_) => None,
        }
    }
}

impl fmt::Display for TextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            TextRepr::Text(s) => f.write_str(s),
            TextRepr::Raw(bytes) => fmt_hex(f, bytes),
        }
    }
}

/// A fixed-width big-endian integer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerValue {
    value: i64,
    length: u8,
    signed: bool,
}

impl IntegerValue {
    /// Create an integer value,
    /// validating that it fits in the declared byte length and signedness.
    pub fn new(value: i64, length: u8, signed: bool) -> Result<Self> {
        ensure!(
            (1..=8).contains(&length),
            IntegerOverflowSnafu {
                value,
                length,
                signed
            }
        );
        let bits = u32::from(length) * 8;
        let (min, max) = if signed {
            (-(1_i128 << (bits - 1)), (1_i128 << (bits - 1)) - 1)
        } else {
            (0, (1_i128 << bits) - 1)
        };
        ensure!(
            (min..=max).contains(&i128::from(value)),
            IntegerOverflowSnafu {
                value,
                length,
                signed
            }
        );
        Ok(IntegerValue {
            value,
            length,
            signed,
        })
    }

    /// The integer value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The declared byte length.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// Whether the wire form is two's complement.
    pub fn signed(&self) -> bool {
        self.signed
    }
}

impl fmt::Display for IntegerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The parameters of an ST 0601 §8 linear fixed-point mapping:
/// an integer domain `(x1, x2)` and a real range `(y1, y2)`.
///
/// Signedness of the wire integer is derived from the range:
/// a negative `y1` means a two's-complement lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedParams {
    /// raw integer domain
    pub domain: (i64, i64),
    /// mapped real range
    pub range: (f64, f64),
}

impl MappedParams {
    /// Create mapping parameters from a domain/range pair.
    pub const fn new(domain: (i64, i64), range: (f64, f64)) -> Self {
        MappedParams { domain, range }
    }

    /// Whether the wire integer is two's complement (`y1 < 0`).
    pub fn signed(&self) -> bool {
        self.range.0 < 0.0
    }

    /// The wire byte length of the lattice:
    /// the fewest octets holding `x2 - x1`.
    pub fn byte_length(&self) -> u8 {
        let span = (self.domain.1 - self.domain.0) as u64;
        let bits = 64 - span.leading_zeros();
        ((bits + 7) / 8).max(1) as u8
    }

    /// The mapping slope `(y2 - y1) / (x2 - x1)`.
    pub fn slope(&self) -> f64 {
        (self.range.1 - self.range.0) / (self.domain.1 - self.domain.0) as f64
    }
}

/// A real value linearly mapped onto a fixed-point integer lattice,
/// or the standard error indicator of such a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MappedValue {
    params: MappedParams,
    repr: MappedRepr,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum MappedRepr {
    Real(f64),
    /// The most-negative representable integer of the lattice,
    /// reserved by the standard to mean "no data".
    ErrorIndicator,
}

impl MappedValue {
    /// Create a mapped value from a native real,
    /// validating it against the declared range.
    pub fn from_real(params: MappedParams, value: f64) -> Result<Self> {
        let (min, max) = params.range;
        ensure!(
            value >= min && value <= max,
            OutOfRangeSnafu { value, min, max }
        );
        Ok(MappedValue {
            params,
            repr: MappedRepr::Real(value),
        })
    }

    /// Create a mapped value from a real already produced by the decode map.
    ///
    /// No range validation is performed: values decoded from an in-domain
    /// lattice point are in range by construction, save for float rounding
    /// at the endpoints.
    pub fn decoded(params: MappedParams, value: f64) -> Self {
        MappedValue {
            params,
            repr: MappedRepr::Real(value),
        }
    }

    /// Create the error-indicator value of the given mapping.
    pub fn error_indicator(params: MappedParams) -> Self {
        MappedValue {
            params,
            repr: MappedRepr::ErrorIndicator,
        }
    }

    /// The mapping parameters.
    pub fn params(&self) -> &MappedParams {
        &self.params
    }

    /// The real value, unless this is the error indicator.
    pub fn real(&self) -> Option<f64> {
        match self.repr {
            MappedRepr::Real(v) => Some(v),
            MappedRepr::ErrorIndicator => None,
        }
    }

    /// Whether this value is the standard error indicator.
    pub fn is_error_indicator(&self) -> bool {
        self.repr == MappedRepr::ErrorIndicator
    }
}

impl fmt::Display for MappedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr {
            MappedRepr::Real(v) => write!(f, "{}", v),
            MappedRepr::ErrorIndicator => {
                f.write_str("0x80")?;
                for _ in 1..self.params.byte_length() {
                    f.write_str("00")?;
                }
                f.write_str(" (Standard error indicator)")
            }
        }
    }
}

/// An enumerated value: an integer index into a declared symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumValue {
    index: u64,
    length: u8,
    symbols: &'static [(u64, &'static str)],
}

impl EnumValue {
    /// Create an enumerated value,
    /// validating that the index fits in the declared byte length.
    ///
    /// Indices with no entry in the symbol table are accepted;
    /// they render as the bare integer.
    pub fn new(index: u64, length: u8, symbols: &'static [(u64, &'static str)]) -> Result<Self> {
        let bits = u32::from(length) * 8;
        ensure!(
            bits >= 64 || index < (1 << bits),
            IndexOverflowSnafu { index, length }
        );
        Ok(EnumValue {
            index,
            length,
            symbols,
        })
    }

    /// The raw integer index.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// The declared byte length.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// The display symbol of the index, if the table declares one.
    pub fn symbol(&self) -> Option<&'static str> {
        self.symbols
            .iter()
            .find(|(i, _)| *i == self.index)
            .map(|(_, s)| *s)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(symbol) => f.write_str(symbol),
            None => write!(f, "{}", self.index),
        }
    }
}

/// A real value mapped per MISB ST 1201 (IMAPB),
/// or the preserved bytes of an ST 1201 special value.
#[derive(Debug, Clone, PartialEq)]
pub struct ImapbValue {
    range: (f64, f64),
    length: u8,
    repr: ImapbRepr,
}

#[derive(Debug, Clone, PartialEq)]
enum ImapbRepr {
    Real(f64),
    /// Raw bytes with the special-value MSB set (infinities, NaN patterns).
    Special(Buf),
}

impl ImapbValue {
    /// Create an IMAPB value from a native real,
    /// validating it against the declared range.
    pub fn from_real(range: (f64, f64), length: u8, value: f64) -> Result<Self> {
        let (min, max) = range;
        ensure!(
            value >= min && value <= max,
            OutOfRangeSnafu { value, min, max }
        );
        Ok(ImapbValue {
            range,
            length,
            repr: ImapbRepr::Real(value),
        })
    }

    /// Create an IMAPB value from a real already produced by the reverse map.
    pub fn decoded(range: (f64, f64), length: u8, value: f64) -> Self {
        ImapbValue {
            range,
            length,
            repr: ImapbRepr::Real(value),
        }
    }

    /// Preserve an ST 1201 special value (leading MSB set) byte-identically.
    pub fn special(range: (f64, f64), bytes: impl Into<Buf>) -> Self {
        let bytes = bytes.into();
        ImapbValue {
            range,
            length: bytes.len() as u8,
            repr: ImapbRepr::Special(bytes),
        }
    }

    /// The declared mapping range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// The wire byte length.
    pub fn length(&self) -> u8 {
        self.length
    }

    /// The real value, unless this is a special value.
    pub fn real(&self) -> Option<f64> {
        match self.repr {
            ImapbRepr::Real(v) => Some(v),
            ImapbRepr::Special(_) => None,
        }
    }

    /// The preserved special-value bytes, if any.
    pub fn special_bytes(&self) -> Option<&[u8]> {
        match &self.repr {
            ImapbRepr::Special(b) => Some(b),
            ImapbRepr::Real(_) => None,
        }
    }
}

impl fmt::Display for ImapbValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            ImapbRepr::Real(v) => write!(f, "{}", v),
            ImapbRepr::Special(bytes) => {
                fmt_hex(f, bytes)?;
                let leading = bytes.first().copied().unwrap_or(0x80);
                write!(f, " ({})", special_value_name(leading))
            }
        }
    }
}

/// The ST 1201 special-value identifier of a leading byte with the MSB set.
fn special_value_name(leading: u8) -> &'static str {
    match leading {
        0xC8 => "Positive Infinity",
        0xE8 => "Negative Infinity",
        0xD0 => "Positive Quiet NaN",
        0xF0 => "Negative Quiet NaN",
        0xD8 => "Positive Signal NaN",
        0xF8 => "Negative Signal NaN",
        _ => "Reserved special value",
    }
}

/// A geographic position: latitude, longitude and altitude,
/// concatenated on the wire as IMAPB values of 4, 4 and 2 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationValue {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl LocationValue {
    /// Latitude range in degrees.
    pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
    /// Longitude range in degrees.
    pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);
    /// Altitude range in metres.
    pub const ALTITUDE_RANGE: (f64, f64) = (-900.0, 19000.0);

    /// Create a location from native degrees/metres values,
    /// validating each component against its range.
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Result<Self> {
        ensure_in(latitude, Self::LATITUDE_RANGE)?;
        ensure_in(longitude, Self::LONGITUDE_RANGE)?;
        ensure_in(altitude, Self::ALTITUDE_RANGE)?;
        Ok(LocationValue {
            latitude,
            longitude,
            altitude,
        })
    }

    /// Create a location from components already produced by the reverse map.
    pub fn decoded(latitude: f64, longitude: f64, altitude: f64) -> Self {
        LocationValue {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude in metres.
    pub fn altitude(&self) -> f64 {
        self.altitude
    }
}

fn ensure_in(value: f64, range: (f64, f64)) -> Result<()> {
    let (min, max) = range;
    ensure!(
        value >= min && value <= max,
        OutOfRangeSnafu { value, min, max }
    );
    Ok(())
}

impl fmt::Display for LocationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.latitude, self.longitude, self.altitude)
    }
}
