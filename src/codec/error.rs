//! Frame builder errors.

use thiserror::Error;

/// Errors produced while composing an outgoing frame.
///
/// Builds are all-or-nothing: when any variant is returned, no bytes
/// were produced and the sequence counter did not advance.
#[derive(Error, Debug)]
pub enum BuildError {
    /// No catalog entry matches the requested id or name.
    #[error("unknown message `{key}`")]
    UnknownMessage {
        /// The id or name that failed to resolve.
        key: String,
    },

    /// A field declared by the message is absent from the supplied map.
    #[error("message `{message}` is missing field `{field}`")]
    MissingField {
        /// Message being built.
        message: String,
        /// Name of the absent field.
        field: String,
    },

    /// Both origin ids are zero; the endpoint is receive-only.
    #[error("sending requires non-zero system and component ids")]
    NotConfigured,

    /// The supplied value kind cannot serve the field's wire type
    /// (for example text supplied for a numeric field).
    #[error("field `{field}` cannot take the supplied value kind")]
    IncompatibleValue {
        /// Name of the mismatched field.
        field: String,
    },

    /// The catalog has not been loaded yet.
    #[error("message catalog not ready")]
    NotReady,
}
