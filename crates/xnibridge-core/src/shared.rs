//! Bootstrapping and the process-wide access point.
//!
//! Prefer [`bootstrap`]: build the bridge once at startup and hand the
//! returned `Arc` to whatever needs it. Call sites that cannot take a
//! handle can use [`initialize`] once and [`shared`] afterwards.
//!
//! The first [`initialize`] decides the outcome for the whole process. A
//! failure is stored like a success: later calls get the same
//! [`BridgeUnavailable`] back and no bridge is ever handed out.

use std::sync::{Arc, OnceLock};

use tracing::{error, info};

use crate::bridge::XniBridge;
use crate::capabilities::CapabilityDescriptor;
use crate::error::{BridgeError, BridgeUnavailable};
use crate::ports::PipelineLibrary;
use crate::selector::BridgeSelector;
use crate::settings::{BridgeSettings, validate_settings};

/// Outcome of process-wide initialization.
pub type SharedBridge = Result<Arc<XniBridge>, Arc<BridgeUnavailable>>;

/// Global initialization outcome, written exactly once.
static SHARED_BRIDGE: OnceLock<SharedBridge> = OnceLock::new();

/// Build a bridge for `library` from settings.
pub fn bootstrap(
    library: Arc<dyn PipelineLibrary>,
    settings: &BridgeSettings,
) -> Result<Arc<XniBridge>, BridgeError> {
    validate_settings(settings)?;
    let descriptor = settings.descriptor()?;
    let selector = BridgeSelector::from_settings(settings);
    Ok(Arc::new(selector.select(library, &descriptor)?))
}

/// Select a bridge and install the outcome as the process-wide one.
///
/// Selection runs at most once per process. Concurrent first callers block
/// until it finishes and all observe the same outcome. Once an outcome is
/// stored, `library`, `descriptor` and `selector` are ignored.
pub fn initialize(
    library: Arc<dyn PipelineLibrary>,
    descriptor: &CapabilityDescriptor,
    selector: &BridgeSelector,
) -> SharedBridge {
    SHARED_BRIDGE
        .get_or_init(|| match selector.select(library, descriptor) {
            Ok(bridge) => {
                info!(
                    library = %bridge.probe_report().library,
                    version = %bridge.probe_report().raw_version,
                    "Shared bridge initialized"
                );
                Ok(Arc::new(bridge))
            }
            Err(unavailable) => {
                error!(
                    library = %unavailable.library,
                    error = %unavailable,
                    "Shared bridge unavailable for the rest of the process"
                );
                Err(Arc::new(unavailable))
            }
        })
        .clone()
}

/// [`initialize`] driven by settings.
///
/// Invalid settings are reported before selection and store nothing.
pub fn initialize_with_settings(
    library: Arc<dyn PipelineLibrary>,
    settings: &BridgeSettings,
) -> Result<Arc<XniBridge>, BridgeError> {
    validate_settings(settings)?;
    let descriptor = settings.descriptor()?;
    let selector = BridgeSelector::from_settings(settings);
    Ok(initialize(library, &descriptor, &selector)?)
}

/// The stored initialization outcome, or `None` before [`initialize`] ran.
///
/// Every call returns the same instance, or the same failure.
pub fn shared() -> Option<SharedBridge> {
    SHARED_BRIDGE.get().cloned()
}

/// Whether a usable bridge is installed.
pub fn is_initialized() -> bool {
    matches!(SHARED_BRIDGE.get(), Some(Ok(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::PipelineCapabilities;
    use crate::manifest::LibraryManifest;
    use crate::selector::SelectionMode;

    // The global is exercised by the integration tests, which each run in
    // their own process. These only cover `bootstrap`.

    fn library(version: Option<&str>, caps: PipelineCapabilities) -> Arc<dyn PipelineLibrary> {
        Arc::new(LibraryManifest::new("Xerces-J", version, caps))
    }

    #[test]
    fn test_bootstrap_supported() {
        let bridge = bootstrap(
            library(Some("2.5.0"), PipelineCapabilities::DECLARE_PREFIX),
            &BridgeSettings::default(),
        )
        .unwrap();
        assert_eq!(bridge.version().unwrap(), "2.5.0");
    }

    #[test]
    fn test_bootstrap_missing_capability_is_unavailable() {
        let err = bootstrap(
            library(Some("2.5.0"), PipelineCapabilities::empty()),
            &BridgeSettings::default(),
        )
        .unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_bootstrap_version_accessor_failure_is_unavailable() {
        let err = bootstrap(
            library(None, PipelineCapabilities::DECLARE_PREFIX),
            &BridgeSettings::default(),
        )
        .unwrap_err();
        assert!(err.is_unavailable());
    }

    #[test]
    fn test_bootstrap_invalid_settings() {
        let settings = BridgeSettings {
            version_requirement: "latest please".to_string(),
            ..Default::default()
        };
        let err = bootstrap(
            library(Some("2.5.0"), PipelineCapabilities::DECLARE_PREFIX),
            &settings,
        )
        .unwrap_err();
        assert!(matches!(err, BridgeError::Settings(_)));
    }

    #[test]
    fn test_bootstrap_honours_settings() {
        let settings = BridgeSettings {
            version_requirement: ">=2.9".to_string(),
            candidate: Some(XniBridge::CANDIDATE.to_string()),
            selection_mode: SelectionMode::VerifyThenConstruct,
            ..Default::default()
        };

        assert!(
            bootstrap(
                library(Some("Xerces-J 2.9.1"), PipelineCapabilities::DECLARE_PREFIX),
                &settings,
            )
            .is_ok()
        );
        assert!(
            bootstrap(
                library(Some("Xerces-J 2.8.0"), PipelineCapabilities::DECLARE_PREFIX),
                &settings,
            )
            .is_err()
        );
    }

    #[test]
    fn test_bootstrap_enforces_extra_required_capabilities() {
        let settings = BridgeSettings {
            required_capabilities: PipelineCapabilities::START_DOCUMENT_NS_CONTEXT,
            ..Default::default()
        };

        let err = bootstrap(
            library(Some("2.5.0"), PipelineCapabilities::DECLARE_PREFIX),
            &settings,
        )
        .unwrap_err();
        assert!(err.is_unavailable());

        assert!(
            bootstrap(
                library(
                    Some("2.5.0"),
                    PipelineCapabilities::DECLARE_PREFIX
                        | PipelineCapabilities::START_DOCUMENT_NS_CONTEXT,
                ),
                &settings,
            )
            .is_ok()
        );
    }
}
