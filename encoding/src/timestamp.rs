//! The 8-byte precision time stamp codec:
//! big-endian unsigned microseconds since 1970-01-01T00:00:00 UTC,
//! not counting leap seconds (MISB ST 0603 epoch).

use std::convert::TryFrom;

use byteordered::byteorder::{BigEndian, ByteOrder};
use chrono::{DateTime, TimeZone, Utc};
use snafu::{ensure, Backtrace, OptionExt, Snafu};

/// An error interpreting a time stamp value.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum TimeRangeError {
    /// Not exactly 8 value bytes.
    #[snafu(display("expected 8 time stamp bytes, got {}", got))]
    Width {
        /// number of bytes present
        got: usize,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
    /// The microsecond count does not fit the calendar representation.
    #[snafu(display("time stamp of {} us is out of the representable range", microseconds))]
    OutOfRange {
        /// microseconds since the epoch
        microseconds: u64,
        /// the generated backtrace, if available
        backtrace: Backtrace,
    },
}

/// Decode an 8-byte big-endian microsecond count into a UTC instant.
pub fn decode(data: &[u8]) -> Result<DateTime<Utc>, TimeRangeError> {
    ensure!(data.len() == 8, WidthSnafu { got: data.len() });
    let microseconds = BigEndian::read_u64(data);
    let signed = i64::try_from(microseconds)
        .ok()
        .context(OutOfRangeSnafu { microseconds })?;
    Utc.timestamp_micros(signed)
        .single()
        .context(OutOfRangeSnafu { microseconds })
}

/// Encode a UTC instant as an 8-byte big-endian microsecond count.
///
/// Sub-microsecond precision is truncated.
/// Instants before the epoch are not representable and return `None`;
/// callers surface this as an encoding error.
pub fn encode(instant: DateTime<Utc>) -> Option<[u8; 8]> {
    let microseconds = u64::try_from(instant.timestamp_micros()).ok()?;
    let mut out = [0_u8; 8];
    BigEndian::write_u64(&mut out, microseconds);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_whole_second_instant() {
        // From MISB ST 0902.5
        let data = [0x00, 0x04, 0x60, 0x50, 0x58, 0x4E, 0x01, 0x80];
        let instant = decode(&data).unwrap();
        assert_eq!(instant.timestamp_micros(), 1_231_798_102_000_000);
        assert_eq!(encode(instant).unwrap(), data);
    }

    #[test]
    fn decodes_fractional_instant() {
        // From MISB ST 0601.9
        let data = [0x00, 0x04, 0x59, 0xF4, 0xA6, 0xAA, 0x4A, 0xA8];
        let instant = decode(&data).unwrap();
        assert_eq!(instant.timestamp_micros(), 1_224_807_209_913_000);
        assert_eq!(encode(instant).unwrap(), data);
    }

    #[test]
    fn rejects_short_input() {
        assert!(matches!(
            decode(&[0x00; 7]),
            Err(TimeRangeError::Width { got: 7, .. })
        ));
    }

    #[test]
    fn rejects_unrepresentable_count() {
        assert!(matches!(
            decode(&[0xFF; 8]),
            Err(TimeRangeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn pre_epoch_is_not_encodable() {
        let instant = Utc.timestamp_micros(-1).unwrap();
        assert!(encode(instant).is_none());
    }
}
