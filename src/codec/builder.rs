//! Outgoing frame composition.

use std::fmt;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::schema::{BaseType, FieldDescriptor, MessageCatalog, MessageDescriptor};

use super::crc::X25;
use super::error::BuildError;
use super::frame::{Frame, FrameHeader, WireVersion};
use super::value::{FieldMap, FieldValue};
use super::FRAME_OVERHEAD;

/// Key selecting a catalog message when building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey<'a> {
    /// Numeric wire id.
    Id(u8),
    /// Catalog name.
    Name(&'a str),
}

impl From<u8> for MessageKey<'static> {
    fn from(id: u8) -> Self {
        Self::Id(id)
    }
}

impl<'a> From<&'a str> for MessageKey<'a> {
    fn from(name: &'a str) -> Self {
        Self::Name(name)
    }
}

impl fmt::Display for MessageKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

/// Serializes field maps into complete wire frames.
///
/// Owns the outgoing sequence counter; the counter advances exactly
/// once per successful build and never on failure.
#[derive(Debug)]
pub struct FrameBuilder {
    version: WireVersion,
    system_id: u8,
    component_id: u8,
    next_sequence: u8,
}

impl FrameBuilder {
    /// Create a builder for the given origin.
    #[must_use]
    pub fn new(version: WireVersion, system_id: u8, component_id: u8) -> Self {
        Self {
            version,
            system_id,
            component_id,
            next_sequence: 0,
        }
    }

    /// Sequence byte the next successful build will carry.
    #[must_use]
    pub const fn next_sequence(&self) -> u8 {
        self.next_sequence
    }

    /// Compose a complete frame for the message selected by `key`.
    ///
    /// Every field declared by the message must be present in
    /// `fields`; surplus keys are ignored.
    #[allow(clippy::cast_possible_truncation)] // payload_length <= 255 by catalog construction
    pub fn build<'a>(
        &mut self,
        catalog: &MessageCatalog,
        key: impl Into<MessageKey<'a>>,
        fields: &FieldMap,
    ) -> Result<Frame, BuildError> {
        if self.system_id == 0 && self.component_id == 0 {
            return Err(BuildError::NotConfigured);
        }

        let key = key.into();
        let descriptor = match key {
            MessageKey::Id(id) => catalog.message_by_id(id),
            MessageKey::Name(name) => catalog.message_by_name(name),
        }
        .ok_or_else(|| BuildError::UnknownMessage {
            key: key.to_string(),
        })?;

        let payload = encode_payload(descriptor, fields)?;

        let sequence = self.next_sequence;
        let mut data = Vec::with_capacity(payload.len() + FRAME_OVERHEAD);
        data.push(self.version.sentinel());
        data.push(descriptor.payload_length() as u8);
        data.push(sequence);
        data.push(self.system_id);
        data.push(self.component_id);
        data.push(descriptor.id());
        data.extend_from_slice(&payload);

        let mut crc = X25::new();
        crc.accumulate_slice(&data[1..]);
        if self.version.seeds_checksum() {
            crc.accumulate(descriptor.crc_seed());
        }
        data.extend_from_slice(&crc.value().to_le_bytes());

        self.next_sequence = self.next_sequence.wrapping_add(1);
        debug!(
            id = descriptor.id(),
            name = descriptor.name(),
            sequence,
            len = data.len(),
            "frame built"
        );

        let header = FrameHeader::new(
            descriptor.payload_length() as u8,
            sequence,
            self.system_id,
            self.component_id,
            descriptor.id(),
        );
        Ok(Frame::new(header, Bytes::from(data)))
    }
}

/// Serialize the field map into a zero-filled payload buffer, writing
/// fields in layout order. Fails without partial output.
fn encode_payload(
    descriptor: &MessageDescriptor,
    fields: &FieldMap,
) -> Result<Vec<u8>, BuildError> {
    let mut payload = vec![0u8; descriptor.payload_length()];
    let mut offset = 0;
    for field in descriptor.fields() {
        let value = fields.get(field.name()).ok_or_else(|| BuildError::MissingField {
            message: descriptor.name().to_owned(),
            field: field.name().to_owned(),
        })?;
        encode_field(field, value, &mut payload, offset)?;
        offset += field.total_size();
    }
    Ok(payload)
}

fn encode_field(
    field: &FieldDescriptor,
    value: &FieldValue,
    payload: &mut [u8],
    offset: usize,
) -> Result<(), BuildError> {
    match (field.base_type(), value) {
        (BaseType::Char, FieldValue::Text(text)) => {
            let capacity = field.element_count();
            let bytes = text.as_bytes();
            if bytes.len() > capacity {
                warn!(
                    field = field.name(),
                    capacity,
                    supplied = bytes.len(),
                    "truncating overlong char value"
                );
            }
            let take = bytes.len().min(capacity);
            payload[offset..offset + take].copy_from_slice(&bytes[..take]);
        }
        (base, FieldValue::Scalar(scalar)) if !field.is_array() => {
            scalar.write(base, payload, offset);
        }
        (base, FieldValue::Array(values)) if field.is_array() => {
            let capacity = field.element_count();
            if values.len() > capacity {
                warn!(
                    field = field.name(),
                    capacity,
                    supplied = values.len(),
                    "truncating overlong array value"
                );
            }
            let size = base.size();
            for (index, scalar) in values.iter().take(capacity).enumerate() {
                scalar.write(base, payload, offset + index * size);
            }
        }
        _ => {
            return Err(BuildError::IncompatibleValue {
                field: field.name().to_owned(),
            })
        }
    }
    Ok(())
}
