//! Plain-data model of parsed message-definition documents.
//!
//! The XML-dialect syntactic parser is an external collaborator; it
//! hands this crate one [`DefinitionDocument`] per definition file.
//! The model is serde-derivable so trees can also cross a process or
//! serialization boundary unchanged.

use serde::{Deserialize, Serialize};

/// One parsed definition document (the tree rooted at `mavlink`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionDocument {
    /// Enumerations declared by the document.
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    /// Messages declared by the document.
    #[serde(default)]
    pub messages: Vec<MessageDef>,
}

/// One message declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDef {
    /// Wire id, unique across the loaded catalog.
    pub id: u8,
    /// Message name, unique across the loaded catalog.
    pub name: String,
    /// Fields in schema (author) order.
    #[serde(default)]
    pub fields: Vec<FieldDef>,
}

/// One field declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Type token: `<base>` or `<base>[N]`.
    #[serde(rename = "type")]
    pub type_token: String,
    /// Field name, unique within the message.
    pub name: String,
}

impl FieldDef {
    /// Convenience constructor.
    #[must_use]
    pub fn new(type_token: &str, name: &str) -> Self {
        Self {
            type_token: type_token.to_owned(),
            name: name.to_owned(),
        }
    }
}

/// One enumeration declaration. Enums are not used by the codec core;
/// they are retained on the catalog for collaborator introspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    /// Enumeration name.
    pub name: String,
    /// Entries in document order.
    #[serde(default)]
    pub entries: Vec<EnumEntry>,
}

/// One enumeration entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumEntry {
    /// Entry name.
    pub name: String,
    /// Explicit value, when the document assigns one.
    #[serde(default)]
    pub value: Option<u32>,
}

impl EnumEntry {
    /// Convenience constructor.
    #[must_use]
    pub fn new(name: &str, value: u32) -> Self {
        Self {
            name: name.to_owned(),
            value: Some(value),
        }
    }
}
