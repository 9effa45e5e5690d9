//! Wire codec: framing constants, primitives, parser, and builder.

mod builder;
mod crc;
mod error;
mod frame;
mod parser;
mod value;
mod wire;

pub use builder::{FrameBuilder, MessageKey};
pub use crc::{checksum, X25};
pub use error::BuildError;
pub use frame::{Frame, FrameHeader, ParseWireVersionError, WireVersion};
pub use parser::{ChecksumFailure, DecodedMessage, FrameParser, ParseEvent};
pub use value::{fields, FieldMap, FieldValue, Scalar};
pub use wire::trim_chars;

/// Start sentinel for v1.0 framing.
pub const STX_V1_0: u8 = 0xFE;

/// Start sentinel for the legacy v0.9 framing.
pub const STX_V0_9: u8 = 0x55;

/// Framing bytes surrounding the payload: the sentinel, five header
/// bytes, and the two-byte CRC trailer.
pub const FRAME_OVERHEAD: usize = 8;

/// Largest payload the one-byte length field can describe.
pub const MAX_PAYLOAD_LEN: usize = 255;

/// Largest complete frame.
pub const MAX_FRAME_LEN: usize = MAX_PAYLOAD_LEN + FRAME_OVERHEAD;

/// Receive accumulator capacity.
pub const RX_BUFFER_LEN: usize = 264;
