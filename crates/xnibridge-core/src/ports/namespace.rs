//! Namespace context port.

use super::PipelineResult;

/// The current set of namespace-prefix bindings inside a pipeline.
///
/// Only the two-argument prefix declaration is part of the port. Libraries
/// whose namespace context lacks it do not advertise
/// [`PipelineCapabilities::DECLARE_PREFIX`](crate::PipelineCapabilities::DECLARE_PREFIX)
/// and are rejected by the probe.
#[cfg_attr(test, mockall::automock)]
pub trait NamespaceContext {
    /// Bind `prefix` to `uri` in the current context.
    ///
    /// Returns `true` if the declaration was accepted.
    fn declare_prefix(&mut self, prefix: &str, uri: &str) -> PipelineResult<bool>;
}
