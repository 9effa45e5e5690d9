//! Schema compilation: definition documents in, message catalog out.
//!
//! The loader ingests parsed definition documents, normalizes field
//! types, computes each message's wire layout and CRC seed, and
//! produces the immutable [`MessageCatalog`] both the parser and the
//! builder resolve against.

mod catalog;
pub mod dialects;
mod document;
mod error;
mod layout;
mod loader;
mod types;

pub use catalog::{FieldDescriptor, MessageCatalog, MessageDescriptor};
pub use document::{DefinitionDocument, EnumDef, EnumEntry, FieldDef, MessageDef};
pub use error::SchemaError;
pub use loader::{load_catalog, BundledSource, DefinitionSource};
pub use types::{parse_type_token, BaseType, FieldType};
