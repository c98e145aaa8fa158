//! Document pipeline ports: handlers, filters, sources and the objects that
//! accompany their notifications.

use std::any::Any;
use std::sync::Arc;

use super::{NamespaceContext, PipelineResult};

/// Position information for the document currently being processed.
pub trait Locator {
    fn public_id(&self) -> Option<&str>;
    fn system_id(&self) -> Option<&str>;
    fn line_number(&self) -> Option<u32>;
    fn column_number(&self) -> Option<u32>;
}

/// Extra per-event data attached by pipeline stages.
///
/// Items are keyed by name and typed by the stage that added them.
pub trait Augmentations {
    /// Look up an item by key.
    fn item(&self, key: &str) -> Option<&dyn Any>;

    /// Whether no items are present.
    fn is_empty(&self) -> bool;
}

/// A pipeline stage that emits document events.
pub trait DocumentSource: Send + Sync {
    /// Identifier for diagnostics.
    fn source_name(&self) -> &str;
}

/// Receiver of document-level notifications.
///
/// Prefix-mapping notifications are intentionally absent: pipelines at the
/// supported version carry namespace bindings in the [`NamespaceContext`]
/// handed to `start_document` instead.
pub trait DocumentHandler {
    /// Signal the start of a document.
    fn start_document(
        &mut self,
        locator: Option<&dyn Locator>,
        encoding: Option<&str>,
        namespace_context: Option<&dyn NamespaceContext>,
        augmentations: Option<&dyn Augmentations>,
    ) -> PipelineResult<()>;
}

/// A handler that also sits downstream of another source.
pub trait DocumentFilter: DocumentHandler {
    /// Bind the source this filter receives events from.
    fn set_document_source(&mut self, source: Option<Arc<dyn DocumentSource>>);

    /// The currently bound source, if any.
    fn document_source(&self) -> Option<Arc<dyn DocumentSource>>;
}
