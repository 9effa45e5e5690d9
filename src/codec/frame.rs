//! Wire frames, their headers, and the framing generation.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use thiserror::Error;

use super::{FRAME_OVERHEAD, STX_V0_9, STX_V1_0};

/// Wire framing generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WireVersion {
    /// v1.0 framing: `0xFE` sentinel, per-message CRC seed.
    #[default]
    V1_0,
    /// Legacy v0.9 framing: `0x55` sentinel, checksum without seed
    /// (best-effort support).
    V0_9,
}

impl WireVersion {
    /// Start sentinel byte for this generation.
    #[must_use]
    pub const fn sentinel(self) -> u8 {
        match self {
            Self::V1_0 => STX_V1_0,
            Self::V0_9 => STX_V0_9,
        }
    }

    /// Whether the frame checksum mixes in the per-message seed.
    #[must_use]
    pub const fn seeds_checksum(self) -> bool {
        matches!(self, Self::V1_0)
    }
}

impl fmt::Display for WireVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V1_0 => write!(f, "v1.0"),
            Self::V0_9 => write!(f, "v0.9"),
        }
    }
}

/// Error for unrecognized wire-version strings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown wire version `{0}`")]
pub struct ParseWireVersionError(String);

impl FromStr for WireVersion {
    type Err = ParseWireVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "v1.0" | "1.0" => Ok(Self::V1_0),
            "v0.9" | "0.9" => Ok(Self::V0_9),
            other => Err(ParseWireVersionError(other.to_owned())),
        }
    }
}

/// The five header bytes following the start sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    payload_len: u8,
    sequence: u8,
    system_id: u8,
    component_id: u8,
    message_id: u8,
}

impl FrameHeader {
    pub(crate) const fn new(
        payload_len: u8,
        sequence: u8,
        system_id: u8,
        component_id: u8,
        message_id: u8,
    ) -> Self {
        Self {
            payload_len,
            sequence,
            system_id,
            component_id,
            message_id,
        }
    }

    /// Payload length in bytes.
    #[must_use]
    pub const fn payload_len(self) -> u8 {
        self.payload_len
    }

    /// Sequence byte of the frame.
    #[must_use]
    pub const fn sequence(self) -> u8 {
        self.sequence
    }

    /// System id of the originating peer.
    #[must_use]
    pub const fn system_id(self) -> u8 {
        self.system_id
    }

    /// Component id of the originating peer.
    #[must_use]
    pub const fn component_id(self) -> u8 {
        self.component_id
    }

    /// Numeric message id.
    #[must_use]
    pub const fn message_id(self) -> u8 {
        self.message_id
    }
}

/// One complete on-wire frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: FrameHeader,
    data: Bytes,
}

impl Frame {
    pub(crate) fn new(header: FrameHeader, data: Bytes) -> Self {
        debug_assert_eq!(data.len(), header.payload_len() as usize + FRAME_OVERHEAD);
        Self { header, data }
    }

    /// Header of the frame.
    #[must_use]
    pub const fn header(&self) -> &FrameHeader {
        &self.header
    }

    /// Complete wire bytes, sentinel through CRC trailer.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the frame, yielding its wire bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data
    }

    /// Payload view between header and CRC trailer.
    #[must_use]
    pub fn payload(&self) -> Bytes {
        self.data.slice(6..6 + self.header.payload_len() as usize)
    }

    /// Total frame length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the frame is empty (it never is; kept for slice-like
    /// API symmetry).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_strings_roundtrip() {
        assert_eq!("v1.0".parse(), Ok(WireVersion::V1_0));
        assert_eq!("v0.9".parse(), Ok(WireVersion::V0_9));
        assert_eq!(WireVersion::V1_0.to_string(), "v1.0");
        assert!("v2.0".parse::<WireVersion>().is_err());
    }

    #[test]
    fn sentinels_per_version() {
        assert_eq!(WireVersion::V1_0.sentinel(), 0xFE);
        assert_eq!(WireVersion::V0_9.sentinel(), 0x55);
        assert!(WireVersion::V1_0.seeds_checksum());
        assert!(!WireVersion::V0_9.seeds_checksum());
    }

    #[test]
    fn payload_view_excludes_framing() {
        let header = FrameHeader::new(2, 0, 1, 1, 9);
        let frame = Frame::new(
            header,
            Bytes::from_static(&[0xFE, 2, 0, 1, 1, 9, 0xAA, 0xBB, 0x00, 0x00]),
        );
        assert_eq!(frame.payload().as_ref(), &[0xAA, 0xBB]);
        assert_eq!(frame.len(), 10);
    }
}
