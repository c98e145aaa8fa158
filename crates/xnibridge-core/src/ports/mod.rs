//! Port definitions (trait abstractions) for the external XML pipeline library.
//!
//! Ports define the narrow surface the bridge consumes from the pipeline
//! library. The library owns every object passed through these traits; the
//! bridge only borrows them for the duration of a single call.
//!
//! # Design Rules
//!
//! - No parsing, tokenizing or namespace resolution lives here
//! - Prefix-mapping events are absent from `DocumentHandler` (dropped upstream)
//! - Collaborator failures use `PipelineError` and flow through unchanged

pub mod document;
pub mod library;
pub mod namespace;

use thiserror::Error;

pub use document::{Augmentations, DocumentFilter, DocumentHandler, DocumentSource, Locator};
pub use library::PipelineLibrary;
pub use namespace::NamespaceContext;

/// Errors raised by pipeline collaborators.
///
/// The bridge never constructs these for forwarded calls; they originate in
/// the library's own implementations and reach the caller untouched.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A namespace binding could not be declared.
    #[error("Namespace error: {0}")]
    Namespace(String),

    /// A document handler rejected a notification.
    #[error("Document handler error: {0}")]
    Handler(String),

    /// The library could not report its version.
    #[error("Version unavailable: {0}")]
    VersionUnavailable(String),

    /// The pipeline was wired incorrectly (missing source, closed handler, etc.).
    #[error("Pipeline configuration error: {0}")]
    Configuration(String),

    /// Any other library-specific failure.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for calls into the pipeline library.
pub type PipelineResult<T> = Result<T, PipelineError>;
