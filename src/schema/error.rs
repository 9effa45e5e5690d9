//! Schema loading errors.

use thiserror::Error;

/// Errors surfaced while loading definition documents into a catalog.
///
/// Any of these leaves the catalog unbuilt; there is no partially
/// ready state.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// Two messages share one wire id.
    #[error("duplicate message id {id} (`{first}` and `{second}`)")]
    DuplicateId {
        /// The contested id.
        id: u8,
        /// Name of the message already registered under the id.
        first: String,
        /// Name of the message attempting to reuse it.
        second: String,
    },

    /// Two messages share one name.
    #[error("duplicate message name `{name}`")]
    DuplicateName {
        /// The contested name.
        name: String,
    },

    /// A field declares a type token outside the grammar.
    #[error("unknown type `{token}` on field `{field}` of `{message}`")]
    UnknownType {
        /// Message declaring the field.
        message: String,
        /// Field carrying the token.
        field: String,
        /// The offending token.
        token: String,
    },

    /// Reading a definition document failed.
    #[error("failed to read definition `{path}`")]
    Io {
        /// Identifier or path of the unreadable document.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The message's fields sum past what the one-byte frame length
    /// can describe.
    #[error("message `{message}` payload is {payload_length} bytes (max 255)")]
    OversizedPayload {
        /// The unframeable message.
        message: String,
        /// Its computed payload length.
        payload_length: usize,
    },
}
