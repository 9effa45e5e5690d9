//! uvlink - framed telemetry/control codec for small unmanned vehicle
//! links.
//!
//! The codec turns an arbitrarily chopped byte stream into decoded
//! telemetry messages and serializes field maps back into valid wire
//! frames. Message layouts are not hard-coded: a catalog is compiled
//! at load time from definition documents, each descriptor carrying
//! its payload layout and per-message CRC seed.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use uvlink::{fields, BundledSource, Link, LinkConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut link = Link::new(LinkConfig::default().with_origin(1, 1));
//! link.load(&BundledSource).await?;
//!
//! link.on("ATTITUDE", |message| {
//!     println!("roll = {:?}", message.fields["roll"]);
//! });
//!
//! let frame = link.send(
//!     "HEARTBEAT",
//!     &fields([
//!         ("type", 6u8.into()),
//!         ("autopilot", 3u8.into()),
//!         ("base_mode", 0u8.into()),
//!         ("custom_mode", 0u32.into()),
//!         ("system_status", 4u8.into()),
//!         ("mavlink_version", 3u8.into()),
//!     ]),
//! )?;
//!
//! // Hand frame.as_bytes() to the transport; feed received bytes
//! // back through link.feed().
//! link.feed(frame.as_bytes());
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//!
//! - **Transport-agnostic** - the crate consumes and produces raw
//!   byte buffers only; serial, TCP, or UDP plumbing lives outside.
//! - **Self-resynchronizing** - corrupt input is dropped with a
//!   diagnostic event and the parser rescans for the start sentinel.
//! - **Single-threaded** - `feed` dispatches synchronously in the
//!   caller's context; the compiled catalog is immutable and may be
//!   shared across endpoints.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod codec;
pub mod link;
pub mod schema;

pub use codec::{
    checksum, fields, trim_chars, BuildError, ChecksumFailure, DecodedMessage, FieldMap,
    FieldValue, Frame, FrameBuilder, FrameHeader, FrameParser, MessageKey, ParseEvent, Scalar,
    WireVersion, X25,
};
pub use link::{Link, LinkConfig};
pub use schema::{
    load_catalog, BaseType, BundledSource, DefinitionDocument, DefinitionSource, EnumDef,
    EnumEntry, FieldDef, FieldDescriptor, MessageCatalog, MessageDef, MessageDescriptor,
    SchemaError,
};
