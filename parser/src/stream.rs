//! This module contains the top-level packet reader.
//!
//! Each iteration frames one 16-byte-keyed KLV packet from the source and
//! verifies its trailing ST 0601 checksum element. A checksum mismatch is a
//! non-fatal diagnostic: a warning is emitted and the packet is still
//! yielded, so that callers can inspect the damaged content. Missing or
//! misplaced checksum elements are reported the same way.

use std::io::Read;

use klv_core::UniversalLabel;
use klv_encoding::checksum::Sum16;
use tracing::warn;

use crate::read::{Error, KeyLength, KlvReader, LengthBuf, RawKlv};

/// The result of verifying the trailing checksum element of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumStatus {
    /// A trailing `01 02` element is present and its stored sum matches.
    Valid(u16),
    /// A trailing `01 02` element is present but disagrees with the
    /// computed sum.
    Mismatch {
        /// the sum stored in the packet
        stored: u16,
        /// the sum computed over the packet bytes
        computed: u16,
    },
    /// The last four value bytes are not a checksum element
    /// (ST 0601 requires the checksum to be the final child).
    Missing,
}

impl ChecksumStatus {
    /// Whether the packet carried a matching checksum.
    pub fn is_valid(&self) -> bool {
        matches!(self, ChecksumStatus::Valid(_))
    }
}

/// A raw top-level packet: the Universal Label key, the length octets as
/// read, the value bytes, and the outcome of checksum verification.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPacket {
    /// the 16-byte Universal Label key
    pub key: UniversalLabel,
    /// the raw BER length octets
    pub length: LengthBuf,
    /// the value bytes of the packet
    pub value: Vec<u8>,
    /// the outcome of checksum verification
    pub checksum: ChecksumStatus,
}

impl RawPacket {
    /// Reassemble the packet bytes exactly as they were read.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(16 + self.length.len() + self.value.len());
        out.extend_from_slice(self.key.as_bytes());
        out.extend_from_slice(&self.length);
        out.extend_from_slice(&self.value);
        out
    }
}

/// A reader of top-level KLV packets over a byte source.
#[derive(Debug)]
pub struct PacketReader<S> {
    inner: KlvReader<S>,
}

impl<S> PacketReader<S>
where
    S: Read,
{
    /// Create a new packet reader over the given source.
    pub fn new(source: S) -> Self {
        PacketReader {
            inner: KlvReader::new(source, KeyLength::Universal),
        }
    }

    fn verify(key: &UniversalLabel, length: &[u8], value: &[u8]) -> ChecksumStatus {
        let n = value.len();
        if n < 4 || value[n - 4] != 0x01 || value[n - 3] != 0x02 {
            warn!(
                key = %key,
                "packet does not end with a checksum element"
            );
            return ChecksumStatus::Missing;
        }
        let stored = (u16::from(value[n - 2]) << 8) | u16::from(value[n - 1]);
        let mut sum = Sum16::new();
        sum.update(key.as_bytes());
        sum.update(length);
        sum.update(&value[..n - 2]);
        let computed = sum.finish();
        if stored == computed {
            ChecksumStatus::Valid(stored)
        } else {
            warn!(
                key = %key,
                stored, computed, "packet checksum mismatch"
            );
            ChecksumStatus::Mismatch { stored, computed }
        }
    }
}

impl<S> Iterator for PacketReader<S>
where
    S: Read,
{
    type Item = Result<RawPacket, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let RawKlv { key, length, value } = match self.inner.next()? {
            Ok(triple) => triple,
            Err(e) => return Some(Err(e)),
        };
        let mut key_bytes = [0_u8; 16];
        key_bytes.copy_from_slice(&key);
        let key = UniversalLabel::new(key_bytes);
        let checksum = Self::verify(&key, &length, &value);
        Some(Ok(RawPacket {
            key,
            length,
            value,
            checksum,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UAS_KEY: [u8; 16] = [
        0x06, 0x0E, 0x2B, 0x34, 0x02, 0x0B, 0x01, 0x01, 0x0E, 0x01, 0x03, 0x01, 0x01, 0x00, 0x00,
        0x00,
    ];

    fn packet_with_checksum(children: &[u8]) -> Vec<u8> {
        let mut value = children.to_vec();
        value.extend_from_slice(&[0x01, 0x02, 0x00, 0x00]);
        let mut out = Vec::new();
        out.extend_from_slice(&UAS_KEY);
        assert!(value.len() < 128);
        out.push(value.len() as u8);
        out.extend_from_slice(&value);
        let computed = klv_encoding::checksum::packet_checksum(&out);
        let n = out.len();
        out[n - 2] = (computed >> 8) as u8;
        out[n - 1] = (computed & 0xFF) as u8;
        out
    }

    #[test]
    fn yields_packet_with_valid_checksum() {
        let data = packet_with_checksum(&[0x03, 0x02, 0x41, 0x42]);
        let mut reader = PacketReader::new(&data[..]);
        let packet = reader.next().unwrap().unwrap();
        assert_eq!(packet.key, UniversalLabel::new(UAS_KEY));
        assert!(packet.checksum.is_valid());
        assert_eq!(packet.to_bytes(), data);
        assert!(reader.next().is_none());
    }

    #[test]
    fn mismatching_checksum_is_non_fatal() {
        let mut data = packet_with_checksum(&[0x03, 0x02, 0x41, 0x42]);
        let n = data.len();
        data[n - 1] ^= 0xFF;
        let mut reader = PacketReader::new(&data[..]);
        let packet = reader.next().unwrap().unwrap();
        assert!(matches!(
            packet.checksum,
            ChecksumStatus::Mismatch { .. }
        ));
        // the damaged bytes are preserved as read
        assert_eq!(packet.to_bytes(), data);
    }

    #[test]
    fn missing_checksum_is_reported() {
        let mut data = Vec::new();
        data.extend_from_slice(&UAS_KEY);
        data.push(0x04);
        data.extend_from_slice(&[0x03, 0x02, 0x41, 0x42]);
        let mut reader = PacketReader::new(&data[..]);
        let packet = reader.next().unwrap().unwrap();
        assert_eq!(packet.checksum, ChecksumStatus::Missing);
    }

    #[test]
    fn multiple_packets_in_source_order() {
        let mut data = packet_with_checksum(&[0x03, 0x02, 0x41, 0x42]);
        data.extend_from_slice(&packet_with_checksum(&[0x03, 0x02, 0x43, 0x44]));
        let packets: Vec<_> = PacketReader::new(&data[..])
            .map(|r| r.unwrap())
            .collect();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].value[2..4], [0x41, 0x42]);
        assert_eq!(packets[1].value[2..4], [0x43, 0x44]);
    }

    #[test]
    fn truncated_packet_is_an_error() {
        let data = packet_with_checksum(&[0x03, 0x02, 0x41, 0x42]);
        let mut reader = PacketReader::new(&data[..data.len() - 2]);
        assert!(matches!(
            reader.next(),
            Some(Err(Error::TruncatedValue { .. }))
        ));
        assert!(reader.next().is_none());
    }
}
