//! Definition sources and catalog loading.

use std::future::Future;
use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::codec::WireVersion;

use super::catalog::MessageCatalog;
use super::dialects;
use super::document::DefinitionDocument;
use super::error::SchemaError;

/// Resolves definition identifiers to parsed documents.
///
/// Implementations that read from disk or network surface failures as
/// [`SchemaError::Io`]; the syntactic parsing itself happens outside
/// this crate.
pub trait DefinitionSource {
    /// Fetch the parsed document registered under `ident` for the
    /// given wire generation.
    fn fetch(
        &self,
        ident: &str,
        version: WireVersion,
    ) -> impl Future<Output = Result<DefinitionDocument, SchemaError>> + Send;
}

/// Source backed by the dialect subsets bundled with this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl DefinitionSource for BundledSource {
    fn fetch(
        &self,
        ident: &str,
        _version: WireVersion,
    ) -> impl Future<Output = Result<DefinitionDocument, SchemaError>> + Send {
        let result = match ident {
            "common" => Ok(dialects::common()),
            "ardupilotmega" => Ok(dialects::ardupilotmega()),
            other => Err(SchemaError::Io {
                path: other.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no bundled definition"),
            }),
        };
        async move { result }
    }
}

/// Fetch the named definition documents and compile them into a
/// catalog.
///
/// Documents are fetched one at a time; beyond duplicate detection the
/// resulting catalog does not depend on fetch order.
pub async fn load_catalog<S: DefinitionSource>(
    source: &S,
    definitions: &[impl AsRef<str>],
    version: WireVersion,
) -> Result<Arc<MessageCatalog>, SchemaError> {
    let mut documents = Vec::with_capacity(definitions.len());
    for ident in definitions {
        let ident = ident.as_ref();
        debug!(ident, %version, "fetching definition document");
        documents.push(source.fetch(ident, version).await?);
    }
    Ok(Arc::new(MessageCatalog::from_documents(&documents)?))
}
