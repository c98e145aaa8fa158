//! Construction-time error types.
//!
//! Forwarded calls never produce these; they only describe why a bridge
//! could not be built for the loaded library.

use std::sync::Arc;

use semver::{Version, VersionReq};
use thiserror::Error;

use crate::capabilities::PipelineCapabilities;
use crate::ports::PipelineError;
use crate::settings::SettingsError;

/// The loaded library does not meet the bridge's requirements.
///
/// Callers only need to know that the environment is unsupported; the
/// attached [`UnsupportedReason`] keeps the diagnostic detail.
#[derive(Debug, Error)]
#[error("Unsupported pipeline environment ({library}): {reason}")]
pub struct UnsupportedEnvironment {
    /// Name the library reported for itself.
    pub library: String,
    /// Which check failed.
    #[source]
    pub reason: UnsupportedReason,
}

impl UnsupportedEnvironment {
    pub fn new(library: impl Into<String>, reason: UnsupportedReason) -> Self {
        Self {
            library: library.into(),
            reason,
        }
    }
}

/// Why the probe rejected a library.
#[derive(Debug, Error)]
pub enum UnsupportedReason {
    /// The version accessor could not be invoked.
    #[error("version accessor failed")]
    VersionAccessorFailed(#[source] PipelineError),

    /// The accessor returned something that is not a version.
    #[error("reported version {0:?} is not recognizable")]
    UnrecognizedVersion(String),

    /// The version is outside the supported range.
    #[error("version {found} does not satisfy {required}")]
    VersionMismatch { found: Version, required: VersionReq },

    /// Required interface features are absent.
    #[error("missing capabilities: {0:?}")]
    MissingCapabilities(PipelineCapabilities),
}

/// No bridge candidate could be constructed for the loaded library.
///
/// This is fatal for the process: there is no degraded mode.
#[derive(Debug, Error)]
#[error("Bridge unavailable for {library} (tried: {attempted:?}): {cause}")]
pub struct BridgeUnavailable {
    /// Library the selection ran against.
    pub library: String,
    /// Candidate names tried, in order.
    pub attempted: Vec<String>,
    /// Why the last attempt failed.
    #[source]
    pub cause: UnavailableCause,
}

/// Tagged cause attached to [`BridgeUnavailable`].
#[derive(Debug, Error)]
pub enum UnavailableCause {
    /// The last candidate's probe rejected the environment.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedEnvironment),

    /// The configured candidate name is not registered.
    #[error("unknown bridge candidate: {0}")]
    UnknownCandidate(String),

    /// The selector has no candidates at all.
    #[error("no bridge candidates registered")]
    NoCandidates,
}

/// Top-level error for bootstrapping the bridge from settings.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Selection failed.
    ///
    /// Shared so the process-wide access point can hand the same failure to
    /// every caller.
    #[error(transparent)]
    Unavailable(#[from] Arc<BridgeUnavailable>),

    /// Settings could not be turned into a descriptor.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<BridgeUnavailable> for BridgeError {
    fn from(err: BridgeUnavailable) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}

impl BridgeError {
    /// Whether this error means the environment itself is unsupported.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}
