//! Version-gated bridge over XNI-style XML pipeline libraries.
//!
//! The bridge checks once, at startup, that the pipeline library in use
//! reports a supported version and exposes the required interface shape.
//! After that it forwards a fixed set of pipeline calls so that call sites
//! never depend on the library's version-specific signatures.
//!
//! ```ignore
//! use std::sync::Arc;
//! use xnibridge_core::{BridgeSettings, LibraryManifest, bootstrap};
//!
//! let library = Arc::new(LibraryManifest::load("xerces.json".as_ref())?);
//! let bridge = bootstrap(library, &BridgeSettings::from_env()?)?;
//! bridge.declare_prefix(&mut ctx, "xml", "http://www.w3.org/XML/1998/namespace")?;
//! ```
#![deny(unused_crate_dependencies)]

pub mod bridge;
pub mod capabilities;
pub mod error;
pub mod manifest;
pub mod ports;
pub mod probe;
pub mod selector;
pub mod settings;
pub mod shared;

// Re-export commonly used types for convenience
pub use bridge::XniBridge;
pub use capabilities::{
    BASELINE_VERSION_REQUIREMENT, CapabilityDescriptor, PipelineCapabilities, TARGET_MAJOR_VERSION,
};
pub use error::{
    BridgeError, BridgeUnavailable, UnavailableCause, UnsupportedEnvironment, UnsupportedReason,
};
pub use manifest::{LibraryManifest, ManifestError};
pub use ports::{
    Augmentations, DocumentFilter, DocumentHandler, DocumentSource, Locator, NamespaceContext,
    PipelineError, PipelineLibrary, PipelineResult,
};
pub use probe::{ProbeReport, parse_reported_version, probe};
pub use selector::{BUILTIN_CANDIDATES, BridgeCandidate, BridgeSelector, SelectionMode};
pub use settings::{
    BridgeSettings, SettingsError, SettingsUpdate, parse_capabilities, validate_settings,
};
pub use shared::{
    SharedBridge, bootstrap, initialize, initialize_with_settings, is_initialized, shared,
};
