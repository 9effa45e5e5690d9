//! Link-level composition: configuration, subscriber channels, and
//! the parse/build surface.
//!
//! A [`Link`] is one codec endpoint. It owns a parser and a builder,
//! shares an immutable catalog, and dispatches decoded events to
//! registered subscribers synchronously from [`Link::feed`] - there
//! is no task, lock, or queue behind it; the caller's thread drives
//! everything.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::codec::{
    BuildError, ChecksumFailure, DecodedMessage, FieldMap, Frame, FrameBuilder, FrameParser,
    MessageKey, ParseEvent, WireVersion,
};
use crate::schema::{load_catalog, DefinitionSource, MessageCatalog, SchemaError};

/// Construction-time options for a [`Link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Origin system id. Zero selects promiscuous receive and forbids
    /// sending.
    pub system_id: u8,
    /// Origin component id, same zero semantics as `system_id`.
    pub component_id: u8,
    /// Wire framing generation.
    pub version: WireVersion,
    /// Definition identifiers to load.
    pub definitions: Vec<String>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            system_id: 0,
            component_id: 0,
            version: WireVersion::V1_0,
            definitions: vec!["common".to_owned(), "ardupilotmega".to_owned()],
        }
    }
}

impl LinkConfig {
    /// Set the origin ids.
    #[must_use]
    pub fn with_origin(mut self, system_id: u8, component_id: u8) -> Self {
        self.system_id = system_id;
        self.component_id = component_id;
        self
    }

    /// Set the framing generation.
    #[must_use]
    pub fn with_version(mut self, version: WireVersion) -> Self {
        self.version = version;
        self
    }

    /// Replace the definition set.
    #[must_use]
    pub fn with_definitions<I, T>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.definitions = definitions.into_iter().map(Into::into).collect();
        self
    }
}

type ReadyHandler = Box<dyn FnOnce()>;
type MessageHandler = Box<dyn FnMut(&DecodedMessage)>;
type SequenceHandler = Box<dyn FnMut(u8)>;
type ChecksumHandler = Box<dyn FnMut(&ChecksumFailure)>;

/// Subscriber registry: one generic message channel, one channel per
/// message name, and the diagnostic channels.
#[derive(Default)]
struct EventHub {
    ready_fired: bool,
    ready: Vec<ReadyHandler>,
    message: Vec<MessageHandler>,
    named: HashMap<String, Vec<MessageHandler>>,
    sequence_error: Vec<SequenceHandler>,
    checksum_fail: Vec<ChecksumHandler>,
}

impl EventHub {
    fn fire_ready(&mut self) {
        if self.ready_fired {
            return;
        }
        self.ready_fired = true;
        for handler in self.ready.drain(..) {
            handler();
        }
    }

    fn dispatch(&mut self, event: &ParseEvent) {
        match event {
            ParseEvent::Message(message) => {
                for handler in &mut self.message {
                    handler(message);
                }
                if let Some(handlers) = self.named.get_mut(&message.name) {
                    for handler in handlers {
                        handler(message);
                    }
                }
            }
            ParseEvent::SequenceError { gap } => {
                for handler in &mut self.sequence_error {
                    handler(*gap);
                }
            }
            ParseEvent::ChecksumFail(failure) => {
                for handler in &mut self.checksum_fail {
                    handler(failure);
                }
            }
        }
    }
}

/// One codec endpoint: catalog, parser, and builder behind subscriber
/// channels.
///
/// A link is single-threaded by design; it is driven from whatever
/// thread owns the transport and holds no internal synchronization.
pub struct Link {
    config: LinkConfig,
    catalog: Option<Arc<MessageCatalog>>,
    parser: FrameParser,
    builder: FrameBuilder,
    events: EventHub,
}

impl Link {
    /// Create an unready link; attach or load a catalog before
    /// feeding.
    #[must_use]
    pub fn new(config: LinkConfig) -> Self {
        let parser = FrameParser::new(config.version, config.system_id, config.component_id);
        let builder = FrameBuilder::new(config.version, config.system_id, config.component_id);
        Self {
            config,
            catalog: None,
            parser,
            builder,
            events: EventHub::default(),
        }
    }

    /// Configuration the link was created with.
    #[must_use]
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Load the configured definition set and make the link ready.
    pub async fn load<S: DefinitionSource>(&mut self, source: &S) -> Result<(), SchemaError> {
        let catalog =
            load_catalog(source, &self.config.definitions, self.config.version).await?;
        self.attach_catalog(catalog);
        Ok(())
    }

    /// Attach an already-compiled catalog. Catalogs are immutable and
    /// may be shared across links. Readiness fires on the first
    /// attach only.
    pub fn attach_catalog(&mut self, catalog: Arc<MessageCatalog>) {
        self.catalog = Some(catalog);
        self.events.fire_ready();
    }

    /// The compiled catalog, once ready.
    #[must_use]
    pub fn catalog(&self) -> Option<&Arc<MessageCatalog>> {
        self.catalog.as_ref()
    }

    /// Whether the catalog is loaded and events may flow.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.catalog.is_some()
    }

    /// Register a one-shot readiness callback.
    ///
    /// Fires immediately when the link is already ready; otherwise it
    /// fires exactly once when the catalog attaches. No `message`
    /// event is ever delivered before readiness.
    pub fn on_ready(&mut self, handler: impl FnOnce() + 'static) {
        if self.events.ready_fired {
            handler();
        } else {
            self.events.ready.push(Box::new(handler));
        }
    }

    /// Subscribe to every decoded message.
    pub fn on_message(&mut self, handler: impl FnMut(&DecodedMessage) + 'static) {
        self.events.message.push(Box::new(handler));
    }

    /// Subscribe to one message name.
    pub fn on(&mut self, name: &str, handler: impl FnMut(&DecodedMessage) + 'static) {
        self.events
            .named
            .entry(name.to_owned())
            .or_default()
            .push(Box::new(handler));
    }

    /// Subscribe to sequence-gap diagnostics.
    pub fn on_sequence_error(&mut self, handler: impl FnMut(u8) + 'static) {
        self.events.sequence_error.push(Box::new(handler));
    }

    /// Subscribe to checksum-failure diagnostics.
    pub fn on_checksum_fail(&mut self, handler: impl FnMut(&ChecksumFailure) + 'static) {
        self.events.checksum_fail.push(Box::new(handler));
    }

    /// Feed raw transport bytes.
    ///
    /// Decoded events dispatch to subscribers synchronously, in byte-
    /// arrival order, before this returns. Input arriving before the
    /// catalog is ready is consumed and discarded.
    pub fn feed(&mut self, bytes: &[u8]) {
        let events = match &self.catalog {
            Some(catalog) => self.parser.feed(bytes, catalog),
            None => {
                trace!(len = bytes.len(), "dropping input before catalog is ready");
                return;
            }
        };
        for event in &events {
            self.events.dispatch(event);
        }
    }

    /// Build an outgoing frame for the caller's transport.
    ///
    /// The sequence counter advances exactly once per successful
    /// build.
    pub fn send<'a>(
        &mut self,
        key: impl Into<MessageKey<'a>>,
        fields: &FieldMap,
    ) -> Result<Frame, BuildError> {
        let catalog = self.catalog.as_ref().ok_or(BuildError::NotReady)?;
        self.builder.build(catalog, key, fields)
    }
}
