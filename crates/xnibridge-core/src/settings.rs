//! Bridge settings and validation.
//!
//! Settings choose the version range the probe enforces, which bridge
//! candidate to use and how selection constructs it. They can come from
//! serialized config or from `XNIBRIDGE_*` environment variables.

use semver::VersionReq;
use serde::{Deserialize, Serialize};

use crate::capabilities::{BASELINE_VERSION_REQUIREMENT, CapabilityDescriptor, PipelineCapabilities};
use crate::selector::SelectionMode;

/// Environment variable overriding the version requirement.
pub const ENV_VERSION_REQ: &str = "XNIBRIDGE_VERSION_REQ";

/// Environment variable naming the preferred bridge candidate.
pub const ENV_CANDIDATE: &str = "XNIBRIDGE_CANDIDATE";

/// Environment variable choosing the selection mode.
pub const ENV_SELECTION_MODE: &str = "XNIBRIDGE_SELECTION_MODE";

/// Environment variable listing capabilities required on top of prefix declaration.
pub const ENV_REQUIRED_CAPABILITIES: &str = "XNIBRIDGE_REQUIRED_CAPABILITIES";

/// Bridge settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BridgeSettings {
    /// Semver requirement the library's reported version must satisfy.
    pub version_requirement: String,

    /// Only try this candidate. `None` tries all registered candidates in order.
    pub candidate: Option<String>,

    /// How selection constructs the winning candidate.
    pub selection_mode: SelectionMode,

    /// Capabilities the library must advertise besides prefix declaration.
    pub required_capabilities: PipelineCapabilities,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            version_requirement: BASELINE_VERSION_REQUIREMENT.to_string(),
            candidate: None,
            selection_mode: SelectionMode::Single,
            required_capabilities: PipelineCapabilities::empty(),
        }
    }
}

impl BridgeSettings {
    /// Load settings from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut settings = Self::default();
        if let Some(req) = get(ENV_VERSION_REQ) {
            settings.version_requirement = req;
        }
        if let Some(candidate) = get(ENV_CANDIDATE) {
            settings.candidate = Some(candidate.trim().to_string());
        }
        if let Some(mode) = get(ENV_SELECTION_MODE) {
            settings.selection_mode = mode.parse()?;
        }
        if let Some(caps) = get(ENV_REQUIRED_CAPABILITIES) {
            settings.required_capabilities = parse_capabilities(&caps)?;
        }

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// Merge an update into these settings, only touching fields that are `Some`.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref req) = other.version_requirement {
            self.version_requirement.clone_from(req);
        }
        if let Some(ref candidate) = other.candidate {
            self.candidate.clone_from(candidate);
        }
        if let Some(mode) = other.selection_mode {
            self.selection_mode = mode;
        }
        if let Some(caps) = other.required_capabilities {
            self.required_capabilities = caps;
        }
    }

    /// Build the descriptor the probe checks against.
    pub fn descriptor(&self) -> Result<CapabilityDescriptor, SettingsError> {
        let version_req = parse_requirement(&self.version_requirement)?;
        Ok(CapabilityDescriptor::new(
            PipelineCapabilities::DECLARE_PREFIX | self.required_capabilities,
            version_req,
        ))
    }
}

/// Partial settings update.
///
/// `candidate` is `Option<Option<String>>`:
/// - `None` = don't change this field
/// - `Some(None)` = clear the preferred candidate
/// - `Some(Some(name))` = prefer `name`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub version_requirement: Option<String>,
    pub candidate: Option<Option<String>>,
    pub selection_mode: Option<SelectionMode>,
    pub required_capabilities: Option<PipelineCapabilities>,
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Invalid version requirement {value:?}: {reason}")]
    InvalidVersionRequirement { value: String, reason: String },

    #[error("Unknown selection mode {0:?} (expected \"single\" or \"verify-then-construct\")")]
    InvalidSelectionMode(String),

    #[error("Bridge candidate name cannot be empty")]
    EmptyCandidate,

    #[error("Invalid capability list {value:?}: {reason}")]
    InvalidCapabilities { value: String, reason: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &BridgeSettings) -> Result<(), SettingsError> {
    parse_requirement(&settings.version_requirement)?;

    if settings
        .candidate
        .as_ref()
        .is_some_and(|c| c.trim().is_empty())
    {
        return Err(SettingsError::EmptyCandidate);
    }

    Ok(())
}

/// Parse `|`-separated capability names, e.g. `"START_DOCUMENT_NS_CONTEXT"`.
pub fn parse_capabilities(value: &str) -> Result<PipelineCapabilities, SettingsError> {
    bitflags::parser::from_str(value.trim()).map_err(|err| SettingsError::InvalidCapabilities {
        value: value.to_string(),
        reason: err.to_string(),
    })
}

fn parse_requirement(value: &str) -> Result<VersionReq, SettingsError> {
    VersionReq::parse(value.trim()).map_err(|err| SettingsError::InvalidVersionRequirement {
        value: value.to_string(),
        reason: err.to_string(),
    })
}
