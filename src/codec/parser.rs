//! Incremental frame parser.
//!
//! A byte-driven state machine: callers push arbitrarily chopped
//! chunks through [`FrameParser::feed`] and receive decoded events in
//! arrival order. Malformed input never raises an error - bytes are
//! consumed and discarded, and diagnostic events describe what was
//! dropped. After any terminal (accept or reject) the parser resumes
//! scanning for the start sentinel, so a corrupted stream
//! resynchronizes within one maximum-length frame.

use tracing::{debug, trace, warn};

use crate::schema::{BaseType, MessageCatalog, MessageDescriptor};

use super::crc::X25;
use super::frame::{FrameHeader, WireVersion};
use super::value::{FieldMap, FieldValue, Scalar};
use super::wire;
use super::{FRAME_OVERHEAD, RX_BUFFER_LEN};

/// A fully decoded inbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedMessage {
    /// Catalog name of the message.
    pub name: String,
    /// Header of the carrying frame.
    pub header: FrameHeader,
    /// Decoded field values keyed by field name.
    pub fields: FieldMap,
}

/// Details of a frame rejected during checksum validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumFailure {
    /// Message id from the frame header.
    pub id: u8,
    /// Seed used for validation; `0` when the id is not in the catalog.
    pub seed: u8,
    /// Checksum computed over the received bytes.
    pub computed: u16,
    /// Checksum carried in the frame trailer.
    pub received: u16,
}

/// Events produced while feeding bytes through the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseEvent {
    /// A validated frame addressed to this consumer.
    Message(DecodedMessage),
    /// A validated frame arrived out of sequence.
    SequenceError {
        /// Number of frames missed, `(seq - last - 1) mod 256`.
        gap: u8,
    },
    /// A frame failed checksum validation and was dropped.
    ChecksumFail(ChecksumFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Len,
    Body,
}

/// Byte-oriented incremental frame parser.
#[derive(Debug)]
pub struct FrameParser {
    version: WireVersion,
    system_id: u8,
    component_id: u8,
    buffer: [u8; RX_BUFFER_LEN],
    cursor: usize,
    payload_len: usize,
    last_sequence: u8,
    state: State,
}

impl FrameParser {
    /// Create a parser. Zero `system_id` and `component_id` select
    /// promiscuous receive (frames from any origin are delivered).
    #[must_use]
    pub fn new(version: WireVersion, system_id: u8, component_id: u8) -> Self {
        Self {
            version,
            system_id,
            component_id,
            buffer: [0; RX_BUFFER_LEN],
            cursor: 0,
            payload_len: 0,
            last_sequence: 0,
            state: State::Idle,
        }
    }

    /// Framing generation this parser scans for.
    #[must_use]
    pub const fn version(&self) -> WireVersion {
        self.version
    }

    /// Sequence byte of the last validated frame.
    #[must_use]
    pub const fn last_sequence(&self) -> u8 {
        self.last_sequence
    }

    /// Feed a chunk of raw transport bytes.
    ///
    /// Events are returned in byte-arrival order. The chunk may split
    /// frames at any position; parser state persists across calls.
    pub fn feed(&mut self, bytes: &[u8], catalog: &MessageCatalog) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        for &byte in bytes {
            self.step(byte, catalog, &mut events);
        }
        events
    }

    fn step(&mut self, byte: u8, catalog: &MessageCatalog, events: &mut Vec<ParseEvent>) {
        match self.state {
            State::Idle => {
                if byte == self.version.sentinel() {
                    self.buffer[0] = byte;
                    self.cursor = 1;
                    self.state = State::Len;
                } else {
                    trace!(byte, "discarding noise while idle");
                }
            }
            State::Len => {
                self.buffer[1] = byte;
                self.cursor = 2;
                self.payload_len = byte as usize;
                self.state = State::Body;
            }
            State::Body => {
                self.buffer[self.cursor] = byte;
                self.cursor += 1;
                if self.cursor == self.payload_len + FRAME_OVERHEAD {
                    self.check(catalog, events);
                    self.reset();
                }
            }
        }
    }

    /// Validate the accumulated frame and emit the resulting events.
    fn check(&mut self, catalog: &MessageCatalog, events: &mut Vec<ParseEvent>) {
        let len = self.payload_len;
        let frame = &self.buffer[..len + FRAME_OVERHEAD];
        let id = frame[5];

        let descriptor = catalog.message_by_id(id);
        // An unknown id validates against seed 0 and is rejected by
        // the comparison below (the seed exists to catch exactly this
        // kind of schema disagreement).
        let seed = descriptor.map_or(0, |d| d.crc_seed());

        let mut crc = X25::new();
        crc.accumulate_slice(&frame[1..6 + len]);
        if self.version.seeds_checksum() {
            crc.accumulate(seed);
        }
        let computed = crc.value();
        let received = u16::from_le_bytes([frame[6 + len], frame[7 + len]]);

        if computed != received {
            warn!(id, seed, computed, received, "dropping frame with bad checksum");
            events.push(ParseEvent::ChecksumFail(ChecksumFailure {
                id,
                seed,
                computed,
                received,
            }));
            return;
        }

        let header = FrameHeader::new(frame[1], frame[2], frame[3], frame[4], frame[5]);
        let sequence = header.sequence();
        // A current byte of 0 is exempt: it is either a fresh peer or
        // a wrap from 255, and the two cannot be told apart here.
        if sequence != 0 && sequence.wrapping_sub(self.last_sequence) != 1 {
            let gap = sequence.wrapping_sub(self.last_sequence).wrapping_sub(1);
            debug!(sequence, last = self.last_sequence, gap, "sequence gap");
            events.push(ParseEvent::SequenceError { gap });
        }
        self.last_sequence = sequence;

        if !self.accepts_origin(header.system_id(), header.component_id()) {
            trace!(
                system_id = header.system_id(),
                component_id = header.component_id(),
                "ignoring frame from unmatched origin"
            );
            return;
        }

        let Some(descriptor) = descriptor else {
            // Reachable only in v0.9 mode, where the checksum carries
            // no seed and cannot vouch for the id.
            debug!(id, "validated frame references unknown message; dropping");
            return;
        };
        if len != descriptor.payload_length() {
            warn!(
                id,
                expected = descriptor.payload_length(),
                got = len,
                "payload length disagrees with catalog; dropping frame"
            );
            return;
        }

        let fields = decode_payload(descriptor, &frame[6..6 + len]);
        debug!(id, name = descriptor.name(), sequence, "frame accepted");
        events.push(ParseEvent::Message(DecodedMessage {
            name: descriptor.name().to_owned(),
            header,
            fields,
        }));
    }

    fn accepts_origin(&self, system_id: u8, component_id: u8) -> bool {
        (self.system_id == 0 && self.component_id == 0)
            || (system_id == self.system_id && component_id == self.component_id)
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.payload_len = 0;
        self.state = State::Idle;
    }
}

/// Decode a validated payload into a field map, reading fields in
/// layout order.
fn decode_payload(descriptor: &MessageDescriptor, payload: &[u8]) -> FieldMap {
    let mut fields = FieldMap::with_capacity(descriptor.fields().len());
    let mut offset = 0;
    for field in descriptor.fields() {
        let value = if field.base_type() == BaseType::Char {
            FieldValue::Text(wire::trim_chars(&payload[offset..offset + field.total_size()]))
        } else if field.is_array() {
            let size = field.type_size();
            let values = (0..field.element_count())
                .map(|index| Scalar::read(field.base_type(), payload, offset + index * size))
                .collect();
            FieldValue::Array(values)
        } else {
            FieldValue::Scalar(Scalar::read(field.base_type(), payload, offset))
        };
        fields.insert(field.name().to_owned(), value);
        offset += field.total_size();
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::checksum;
    use crate::schema::{DefinitionDocument, FieldDef, MessageCatalog, MessageDef};

    fn test_catalog() -> MessageCatalog {
        let document = DefinitionDocument {
            enums: Vec::new(),
            messages: vec![MessageDef {
                id: 7,
                name: "PING".to_owned(),
                fields: vec![
                    FieldDef::new("uint16_t", "value"),
                    FieldDef::new("uint8_t", "flag"),
                ],
            }],
        };
        MessageCatalog::from_documents(&[document]).unwrap()
    }

    fn valid_frame(catalog: &MessageCatalog, sequence: u8) -> Vec<u8> {
        let seed = catalog.message_by_id(7).unwrap().crc_seed();
        let mut bytes = vec![0xFE, 3, sequence, 42, 7, 7, 0x34, 0x12, 0x09];
        let mut crc = X25::new();
        crc.accumulate_slice(&bytes[1..]);
        crc.accumulate(seed);
        bytes.extend_from_slice(&crc.value().to_le_bytes());
        bytes
    }

    #[test]
    fn chopped_delivery_decodes_one_message() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);
        let frame = valid_frame(&catalog, 1);

        let mut events = Vec::new();
        for byte in frame {
            events.extend(parser.feed(&[byte], &catalog));
        }
        assert_eq!(events.len(), 1);
        let ParseEvent::Message(message) = &events[0] else {
            panic!("expected message event, got {events:?}");
        };
        assert_eq!(message.name, "PING");
        assert_eq!(message.fields["value"], FieldValue::Scalar(Scalar::UInt16(0x1234)));
        assert_eq!(message.fields["flag"], FieldValue::Scalar(Scalar::UInt8(0x09)));
    }

    #[test]
    fn garbage_prefix_resynchronizes() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);

        let mut stream = vec![0x00, 0x11, 0x7F, 0xAB];
        stream.extend(valid_frame(&catalog, 1));
        let events = parser.feed(&stream, &catalog);
        assert!(matches!(events.as_slice(), [ParseEvent::Message(_)]));
    }

    #[test]
    fn corrupt_byte_reports_checksum_failure_then_recovers() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);

        let mut corrupt = valid_frame(&catalog, 1);
        *corrupt.last_mut().unwrap() ^= 0x01;
        let events = parser.feed(&corrupt, &catalog);
        assert!(
            matches!(events.as_slice(), [ParseEvent::ChecksumFail(failure)] if failure.id == 7)
        );

        let events = parser.feed(&valid_frame(&catalog, 1), &catalog);
        assert!(matches!(events.as_slice(), [ParseEvent::Message(_)]));
    }

    #[test]
    fn unknown_id_fails_with_zero_seed() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);

        let mut bytes = vec![0xFE, 1, 0, 42, 7, 99, 0xAA];
        bytes.extend_from_slice(&checksum(&bytes[1..]).to_le_bytes());
        let events = parser.feed(&bytes, &catalog);
        let [ParseEvent::ChecksumFail(failure)] = events.as_slice() else {
            panic!("expected checksum failure, got {events:?}");
        };
        assert_eq!(failure.id, 99);
        assert_eq!(failure.seed, 0);
    }

    #[test]
    fn origin_filter_drops_unmatched_sender() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 1, 1);

        // Frames originate from (42, 7); a (1, 1) consumer ignores them.
        let events = parser.feed(&valid_frame(&catalog, 1), &catalog);
        assert!(events.is_empty());
    }

    #[test]
    fn sequence_gap_emits_diagnostic() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);

        let events = parser.feed(&valid_frame(&catalog, 1), &catalog);
        assert_eq!(events.len(), 1);
        let events = parser.feed(&valid_frame(&catalog, 5), &catalog);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ParseEvent::SequenceError { gap: 3 });
        assert!(matches!(events[1], ParseEvent::Message(_)));
    }

    #[test]
    fn wrap_from_255_is_silent() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V1_0, 0, 0);

        parser.feed(&valid_frame(&catalog, 255), &catalog);
        let events = parser.feed(&valid_frame(&catalog, 0), &catalog);
        assert!(matches!(events.as_slice(), [ParseEvent::Message(_)]));
    }

    #[test]
    fn v0_9_frames_validate_without_seed() {
        let catalog = test_catalog();
        let mut parser = FrameParser::new(WireVersion::V0_9, 0, 0);

        let mut bytes = vec![0x55, 3, 1, 42, 7, 7, 0x34, 0x12, 0x09];
        bytes.extend_from_slice(&checksum(&bytes[1..]).to_le_bytes());
        let events = parser.feed(&bytes, &catalog);
        assert!(matches!(events.as_slice(), [ParseEvent::Message(_)]));
    }
}
