//! Bridge candidate selection.
//!
//! A selector holds an ordered list of named bridge constructors. Selection
//! tries them against the loaded library until one constructs; if none does,
//! the caller gets a single [`BridgeUnavailable`] and must not continue.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::bridge::XniBridge;
use crate::capabilities::CapabilityDescriptor;
use crate::error::{BridgeUnavailable, UnavailableCause, UnsupportedEnvironment};
use crate::ports::PipelineLibrary;
use crate::settings::{BridgeSettings, SettingsError};

/// Constructor signature shared by all bridge candidates.
pub type BridgeConstructor =
    fn(Arc<dyn PipelineLibrary>, &CapabilityDescriptor) -> Result<XniBridge, UnsupportedEnvironment>;

/// A named way of building a bridge.
#[derive(Clone, Copy)]
pub struct BridgeCandidate {
    name: &'static str,
    constructor: BridgeConstructor,
}

impl BridgeCandidate {
    pub const fn new(name: &'static str, constructor: BridgeConstructor) -> Self {
        Self { name, constructor }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Run the constructor (and with it, the probe).
    pub fn construct(
        &self,
        library: Arc<dyn PipelineLibrary>,
        descriptor: &CapabilityDescriptor,
    ) -> Result<XniBridge, UnsupportedEnvironment> {
        (self.constructor)(library, descriptor)
    }
}

impl fmt::Debug for BridgeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BridgeCandidate").field(&self.name).finish()
    }
}

/// Candidates every selector starts with.
pub const BUILTIN_CANDIDATES: &[BridgeCandidate] =
    &[BridgeCandidate::new(XniBridge::CANDIDATE, XniBridge::new)];

/// How many times a candidate is constructed during selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMode {
    /// Construct once and keep it.
    #[default]
    Single,
    /// Construct a throwaway instance first, then construct again and keep
    /// the second. Matches hosts that treat the first build as a feasibility
    /// check.
    VerifyThenConstruct,
}

impl SelectionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::VerifyThenConstruct => "verify-then-construct",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionMode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(Self::Single),
            "verify-then-construct" => Ok(Self::VerifyThenConstruct),
            other => Err(SettingsError::InvalidSelectionMode(other.to_string())),
        }
    }
}

/// Picks and constructs the bridge for a library.
#[derive(Debug, Clone)]
pub struct BridgeSelector {
    candidates: Vec<BridgeCandidate>,
    preferred: Option<String>,
    mode: SelectionMode,
}

impl BridgeSelector {
    /// Selector over the built-in candidates.
    pub fn new() -> Self {
        Self {
            candidates: BUILTIN_CANDIDATES.to_vec(),
            preferred: None,
            mode: SelectionMode::Single,
        }
    }

    /// Selector with no candidates registered.
    pub const fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            preferred: None,
            mode: SelectionMode::Single,
        }
    }

    /// Selector configured from settings (preferred candidate and mode).
    pub fn from_settings(settings: &BridgeSettings) -> Self {
        let selector = Self::new().with_mode(settings.selection_mode);
        match &settings.candidate {
            Some(name) => selector.with_preferred(name.clone()),
            None => selector,
        }
    }

    /// Append a candidate after the existing ones.
    #[must_use]
    pub fn with_candidate(mut self, candidate: BridgeCandidate) -> Self {
        self.candidates.push(candidate);
        self
    }

    /// Only try the candidate with this name.
    #[must_use]
    pub fn with_preferred(mut self, name: impl Into<String>) -> Self {
        self.preferred = Some(name.into());
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn preferred(&self) -> Option<&str> {
        self.preferred.as_deref()
    }

    pub fn candidate_names(&self) -> Vec<&'static str> {
        self.candidates.iter().map(BridgeCandidate::name).collect()
    }

    /// Construct a bridge for `library`.
    ///
    /// Candidates are tried in registration order (or just the preferred
    /// one). The first that constructs wins. If none does, the failure of the
    /// last attempt is attached to the returned error.
    pub fn select(
        &self,
        library: Arc<dyn PipelineLibrary>,
        descriptor: &CapabilityDescriptor,
    ) -> Result<XniBridge, BridgeUnavailable> {
        let library_name = library.name().to_string();

        let pool: Vec<&BridgeCandidate> = match &self.preferred {
            Some(name) => match self.candidates.iter().find(|c| c.name == name.as_str()) {
                Some(candidate) => vec![candidate],
                None => {
                    error!(library = %library_name, candidate = %name, "Unknown bridge candidate");
                    return Err(BridgeUnavailable {
                        library: library_name,
                        attempted: Vec::new(),
                        cause: UnavailableCause::UnknownCandidate(name.clone()),
                    });
                }
            },
            None => self.candidates.iter().collect(),
        };

        let mut attempted = Vec::with_capacity(pool.len());
        let mut last_failure = None;

        for candidate in pool {
            attempted.push(candidate.name.to_string());
            match self.construct(candidate, &library, descriptor) {
                Ok(bridge) => {
                    info!(
                        candidate = candidate.name,
                        library = %library_name,
                        version = %bridge.probe_report().version,
                        "Bridge candidate selected"
                    );
                    return Ok(bridge);
                }
                Err(err) => {
                    debug!(candidate = candidate.name, error = %err, "Bridge candidate rejected");
                    last_failure = Some(err);
                }
            }
        }

        let cause = last_failure.map_or(UnavailableCause::NoCandidates, UnavailableCause::Unsupported);
        error!(library = %library_name, ?attempted, %cause, "No usable bridge");
        Err(BridgeUnavailable {
            library: library_name,
            attempted,
            cause,
        })
    }

    fn construct(
        &self,
        candidate: &BridgeCandidate,
        library: &Arc<dyn PipelineLibrary>,
        descriptor: &CapabilityDescriptor,
    ) -> Result<XniBridge, UnsupportedEnvironment> {
        match self.mode {
            SelectionMode::Single => candidate.construct(Arc::clone(library), descriptor),
            SelectionMode::VerifyThenConstruct => {
                let trial = candidate.construct(Arc::clone(library), descriptor)?;
                drop(trial);
                debug!(candidate = candidate.name, "Feasibility build passed, constructing again");
                candidate.construct(Arc::clone(library), descriptor)
            }
        }
    }
}

impl Default for BridgeSelector {
    fn default() -> Self {
        Self::new()
    }
}
