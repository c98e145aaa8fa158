//! The forwarding facade.
//!
//! Call sites go through [`XniBridge`] instead of calling pipeline ports
//! directly, so the ports can change shape between library versions while
//! call-site signatures stay put. Every forwarded call has exactly the effect
//! of calling the port itself; errors come back untouched.

use std::sync::Arc;

use crate::capabilities::CapabilityDescriptor;
use crate::error::UnsupportedEnvironment;
use crate::ports::{
    Augmentations, DocumentFilter, DocumentHandler, DocumentSource, Locator, NamespaceContext,
    PipelineLibrary, PipelineResult,
};
use crate::probe::{ProbeReport, probe};

/// Bridge for pipeline libraries at API version 2.3 and later.
///
/// Immutable after construction, so one instance can be shared across threads.
pub struct XniBridge {
    library: Arc<dyn PipelineLibrary>,
    report: ProbeReport,
}

impl XniBridge {
    /// Registered name of this bridge implementation.
    pub const CANDIDATE: &'static str = "xni-2.3";

    /// Probe `library` and build a bridge over it.
    pub fn new(
        library: Arc<dyn PipelineLibrary>,
        descriptor: &CapabilityDescriptor,
    ) -> Result<Self, UnsupportedEnvironment> {
        let report = probe(library.as_ref(), descriptor)?;
        Ok(Self { library, report })
    }

    /// What the construction-time probe found.
    pub const fn probe_report(&self) -> &ProbeReport {
        &self.report
    }

    pub fn library_name(&self) -> &str {
        self.library.name()
    }

    /// Declare a namespace prefix on `namespace_context`.
    pub fn declare_prefix(
        &self,
        namespace_context: &mut dyn NamespaceContext,
        prefix: &str,
        uri: &str,
    ) -> PipelineResult<bool> {
        namespace_context.declare_prefix(prefix, uri)
    }

    /// The library's raw version string, read fresh from its accessor.
    pub fn version(&self) -> PipelineResult<String> {
        self.library.version()
    }

    /// No-op. Supported pipelines do not take prefix-mapping notifications;
    /// kept so call sites look the same across library versions.
    pub fn start_prefix_mapping(
        &self,
        _handler: &mut dyn DocumentHandler,
        _prefix: &str,
        _uri: &str,
        _augmentations: Option<&dyn Augmentations>,
    ) {
    }

    /// Forward the start-of-document notification to `handler`.
    pub fn start_document(
        &self,
        handler: &mut dyn DocumentHandler,
        locator: Option<&dyn Locator>,
        encoding: Option<&str>,
        namespace_context: Option<&dyn NamespaceContext>,
        augmentations: Option<&dyn Augmentations>,
    ) -> PipelineResult<()> {
        handler.start_document(locator, encoding, namespace_context, augmentations)
    }

    /// Bind `last_source` as the upstream of `filter`.
    pub fn set_document_source(
        &self,
        filter: &mut dyn DocumentFilter,
        last_source: Option<Arc<dyn DocumentSource>>,
    ) {
        filter.set_document_source(last_source);
    }

    /// No-op, see [`start_prefix_mapping`](Self::start_prefix_mapping).
    pub fn end_prefix_mapping(
        &self,
        _handler: &mut dyn DocumentHandler,
        _prefix: &str,
        _augmentations: Option<&dyn Augmentations>,
    ) {
    }
}

impl std::fmt::Debug for XniBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XniBridge")
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}
