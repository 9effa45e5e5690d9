//! Message descriptors and the compiled catalog.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::codec::MAX_PAYLOAD_LEN;

use super::document::{DefinitionDocument, EnumDef, MessageDef};
use super::error::SchemaError;
use super::layout;
use super::types::{parse_type_token, BaseType};

/// One field of one message, annotated with its wire layout data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    base_type: BaseType,
    array_length: Option<usize>,
    source_position: usize,
}

impl FieldDescriptor {
    /// Field name, unique within the message.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element type.
    #[must_use]
    pub const fn base_type(&self) -> BaseType {
        self.base_type
    }

    /// Declared element count for arrays; `None` for scalars.
    #[must_use]
    pub const fn array_length(&self) -> Option<usize> {
        self.array_length
    }

    /// Whether the field was declared with an array suffix.
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.array_length.is_some()
    }

    /// Number of elements serialized on the wire.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.array_length.unwrap_or(1)
    }

    /// Wire size of one element in bytes.
    #[must_use]
    pub const fn type_size(&self) -> usize {
        self.base_type.size()
    }

    /// Wire size of the whole field in bytes.
    #[must_use]
    pub fn total_size(&self) -> usize {
        self.type_size() * self.element_count()
    }

    /// Index of the field in the source document, the layout
    /// tie-breaker.
    #[must_use]
    pub const fn source_position(&self) -> usize {
        self.source_position
    }
}

/// One message with its computed payload layout and CRC seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDescriptor {
    id: u8,
    name: String,
    fields: Vec<FieldDescriptor>,
    payload_length: usize,
    crc_seed: u8,
}

impl MessageDescriptor {
    /// Numeric wire id.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Message name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in wire-layout order (not schema order).
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Total payload length in bytes.
    #[must_use]
    pub const fn payload_length(&self) -> usize {
        self.payload_length
    }

    /// Per-message CRC seed mixed into the frame checksum.
    #[must_use]
    pub const fn crc_seed(&self) -> u8 {
        self.crc_seed
    }
}

/// Immutable lookup table of compiled message descriptors.
///
/// Both maps hold the same `Arc` instances; once built, a catalog
/// never changes and may be shared across codec instances and threads.
#[derive(Debug, Default)]
pub struct MessageCatalog {
    by_id: HashMap<u8, Arc<MessageDescriptor>>,
    by_name: HashMap<String, Arc<MessageDescriptor>>,
    enums: Vec<EnumDef>,
}

impl MessageCatalog {
    /// Compile a catalog from parsed definition documents.
    pub fn from_documents(documents: &[DefinitionDocument]) -> Result<Self, SchemaError> {
        let mut catalog = Self::default();
        for document in documents {
            catalog.enums.extend(document.enums.iter().cloned());
            for message in &document.messages {
                let descriptor = Arc::new(compile_message(message)?);
                if let Some(existing) = catalog.by_id.get(&descriptor.id()) {
                    return Err(SchemaError::DuplicateId {
                        id: descriptor.id(),
                        first: existing.name().to_owned(),
                        second: descriptor.name().to_owned(),
                    });
                }
                if catalog.by_name.contains_key(descriptor.name()) {
                    return Err(SchemaError::DuplicateName {
                        name: descriptor.name().to_owned(),
                    });
                }
                catalog.by_id.insert(descriptor.id(), Arc::clone(&descriptor));
                catalog
                    .by_name
                    .insert(descriptor.name().to_owned(), descriptor);
            }
        }
        debug!(
            messages = catalog.by_id.len(),
            enums = catalog.enums.len(),
            "catalog compiled"
        );
        Ok(catalog)
    }

    /// Look up a descriptor by wire id.
    #[must_use]
    pub fn message_by_id(&self, id: u8) -> Option<&Arc<MessageDescriptor>> {
        self.by_id.get(&id)
    }

    /// Look up a descriptor by name.
    #[must_use]
    pub fn message_by_name(&self, name: &str) -> Option<&Arc<MessageDescriptor>> {
        self.by_name.get(name)
    }

    /// Number of messages in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the catalog holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Iterate descriptors in unspecified order.
    pub fn messages(&self) -> impl Iterator<Item = &Arc<MessageDescriptor>> {
        self.by_id.values()
    }

    /// Enum definitions retained for collaborator introspection.
    #[must_use]
    pub fn enums(&self) -> &[EnumDef] {
        &self.enums
    }
}

/// Materialize one message: parse field tokens, order the layout, and
/// derive the payload length and CRC seed.
fn compile_message(message: &MessageDef) -> Result<MessageDescriptor, SchemaError> {
    let mut fields = Vec::with_capacity(message.fields.len());
    for (source_position, field) in message.fields.iter().enumerate() {
        let Some(parsed) = parse_type_token(&field.type_token) else {
            return Err(SchemaError::UnknownType {
                message: message.name.clone(),
                field: field.name.clone(),
                token: field.type_token.clone(),
            });
        };
        fields.push(FieldDescriptor {
            name: field.name.clone(),
            base_type: parsed.base,
            array_length: parsed.array_length,
            source_position,
        });
    }
    layout::layout_order(&mut fields);

    let payload_length = fields.iter().map(FieldDescriptor::total_size).sum();
    if payload_length > MAX_PAYLOAD_LEN {
        return Err(SchemaError::OversizedPayload {
            message: message.name.clone(),
            payload_length,
        });
    }
    let crc_seed = layout::crc_seed(&message.name, &fields);

    Ok(MessageDescriptor {
        id: message.id,
        name: message.name.clone(),
        fields,
        payload_length,
        crc_seed,
    })
}
