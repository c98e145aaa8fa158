//! Port for the loaded pipeline library itself.

use super::PipelineResult;
use crate::capabilities::PipelineCapabilities;

/// The pipeline library as seen by the capability probe.
///
/// Implementations describe the library the process is linked against: its
/// self-reported version and the interface shape it exposes. The probe uses
/// both to decide whether the bridge may forward calls into it.
///
/// # Example
///
/// ```ignore
/// use xnibridge_core::ports::PipelineLibrary;
///
/// fn describe(lib: &dyn PipelineLibrary) {
///     let version = lib.version();
///     let caps = lib.capabilities();
///     // ...
/// }
/// ```
pub trait PipelineLibrary: Send + Sync {
    /// Human-readable library name (e.g. `"Xerces-J"`).
    fn name(&self) -> &str;

    /// The library's self-reported version string.
    ///
    /// Returned raw; callers parse it themselves.
    fn version(&self) -> PipelineResult<String>;

    /// The interface shape this library build exposes.
    fn capabilities(&self) -> PipelineCapabilities;
}
